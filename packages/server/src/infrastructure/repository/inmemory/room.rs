//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## ロックの構成
//!
//! - `rooms`: ID → ルームの対応表。挿入・参照・削除の間だけロックする
//! - 各ルーム: 個別の `Mutex`。そのルームへの変更はすべてここで直列化される
//!
//! 対応表のロックを保持したままルームのロックを取得することはない。
//!
//! ## 削除と参加の競合
//!
//! 最後の参加者が抜けたルームは、ルームのロック内で `closed` に印を付けてから
//! 対応表から取り除く。その間に `Arc` を取得した参加要求は `closed` を見て
//! `RoomNotFound` を返すため、削除中のルームが復活することはない。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    JoinOutcome, LeaveOutcome, Participant, ParticipantId, RepositoryError, Room, RoomId,
    RoomRepository, TickOutcome, TimerAction, TimerOutcome, Timestamp,
};

/// Room plus its registry lifecycle flag
struct RoomSlot {
    room: Room,
    /// Set once the room is emptied; the slot is unreachable from then on
    closed: bool,
}

type SharedSlot = Arc<Mutex<RoomSlot>>;

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomId, SharedSlot>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, room_id: &RoomId) -> Result<SharedSlot, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))
    }

    async fn all_slots(&self) -> Vec<(RoomId, SharedSlot)> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .map(|(id, slot)| (id.clone(), slot.clone()))
            .collect()
    }

    /// Remove the entry only if it still refers to `slot`.
    async fn remove_slot(&self, room_id: &RoomId, slot: &SharedSlot) {
        let mut rooms = self.rooms.lock().await;
        let same = rooms
            .get(room_id)
            .is_some_and(|current| Arc::ptr_eq(current, slot));
        if same {
            rooms.remove(room_id);
            tracing::info!("Room '{}' is empty and was deleted", room_id);
        }
    }

    fn not_found(room_id: &RoomId) -> RepositoryError {
        RepositoryError::RoomNotFound(room_id.as_str().to_string())
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert_room(&self, room: Room) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&room.id) {
            return Err(RepositoryError::DuplicateRoomId(
                room.id.as_str().to_string(),
            ));
        }
        let room_id = room.id.clone();
        rooms.insert(
            room_id,
            Arc::new(Mutex::new(RoomSlot {
                room,
                closed: false,
            })),
        );
        Ok(())
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let slot = self.slot(room_id).await?;
        let slot = slot.lock().await;
        if slot.closed {
            return Err(Self::not_found(room_id));
        }
        Ok(slot.room.clone())
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let mut result = Vec::new();
        for (_, slot) in self.all_slots().await {
            let slot = slot.lock().await;
            if !slot.closed {
                result.push(slot.room.clone());
            }
        }
        result.sort_by_key(|room| room.created_at);
        result
    }

    async fn add_participant(
        &self,
        room_id: &RoomId,
        participant: Participant,
        now: Timestamp,
    ) -> Result<JoinOutcome, RepositoryError> {
        let slot = self.slot(room_id).await?;
        let mut slot = slot.lock().await;
        if slot.closed {
            return Err(Self::not_found(room_id));
        }
        let newly_joined = slot.room.add_participant(participant);
        slot.room.timer.refresh(now);
        Ok(JoinOutcome {
            room: slot.room.clone(),
            newly_joined,
        })
    }

    async fn remove_participant(
        &self,
        room_id: &RoomId,
        participant_id: &ParticipantId,
    ) -> Result<LeaveOutcome, RepositoryError> {
        let shared = self.slot(room_id).await?;
        let outcome = {
            let mut slot = shared.lock().await;
            if slot.closed {
                return Err(Self::not_found(room_id));
            }
            let participant = slot.room.remove_participant(participant_id).ok_or_else(|| {
                RepositoryError::ParticipantNotFound(participant_id.as_str().to_string())
            })?;
            let room_closed = slot.room.is_empty();
            slot.closed = room_closed;
            LeaveOutcome {
                room: slot.room.clone(),
                participant,
                room_closed,
            }
        };

        if outcome.room_closed {
            self.remove_slot(room_id, &shared).await;
        }
        Ok(outcome)
    }

    async fn apply_timer_action(
        &self,
        room_id: &RoomId,
        action: TimerAction,
        now: Timestamp,
    ) -> Result<TimerOutcome, RepositoryError> {
        let slot = self.slot(room_id).await?;
        let mut slot = slot.lock().await;
        if slot.closed {
            return Err(Self::not_found(room_id));
        }
        let transition = slot.room.apply_timer_action(action, now);
        Ok(TimerOutcome {
            room: slot.room.clone(),
            transition,
        })
    }

    async fn get_running_room_ids(&self) -> Vec<RoomId> {
        let mut running = Vec::new();
        for (room_id, slot) in self.all_slots().await {
            let slot = slot.lock().await;
            if !slot.closed && slot.room.timer.is_running {
                running.push(room_id);
            }
        }
        running
    }

    async fn advance_timer(
        &self,
        room_id: &RoomId,
        now: Timestamp,
    ) -> Result<TickOutcome, RepositoryError> {
        let slot = self.slot(room_id).await?;
        let mut slot = slot.lock().await;
        if slot.closed {
            return Err(Self::not_found(room_id));
        }
        let result = slot.room.advance(now);
        Ok(TickOutcome {
            room: slot.room.clone(),
            result,
        })
    }

    async fn count_rooms(&self) -> usize {
        self.rooms.lock().await.len()
    }
}
