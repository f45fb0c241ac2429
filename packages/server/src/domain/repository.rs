//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 並行性の契約
//!
//! - 同じルームへの変更はすべて直列化される（ルームごとに 1 つのクリティカルセクション）
//! - 異なるルームへの変更は並行に進んでよい
//! - 返される `Room` は変更直後のスナップショット（クローン）

use async_trait::async_trait;

use super::{
    Participant, ParticipantId, RepositoryError, Room, RoomId, TickResult, TimerAction,
    TimerTransition, Timestamp,
};

/// Result of adding a participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub room: Room,
    /// `false` if the participant was already in the room
    pub newly_joined: bool,
}

/// Result of removing a participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub room: Room,
    pub participant: Participant,
    /// `true` if the room became empty and was deleted
    pub room_closed: bool,
}

/// Result of applying a timer action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerOutcome {
    pub room: Room,
    pub transition: TimerTransition,
}

/// Result of advancing one room's timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub room: Room,
    pub result: TickResult,
}

/// Room Repository trait（ルームレジストリ）
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 新しい Room を登録（ID が重複する場合はエラー）
    async fn insert_room(&self, room: Room) -> Result<(), RepositoryError>;

    /// Room を取得
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// 全ての Room を取得
    async fn get_rooms(&self) -> Vec<Room>;

    /// 参加者を追加（同じ ID なら何もしない）。返す Room の残り時間は `now` 時点に更新される
    async fn add_participant(
        &self,
        room_id: &RoomId,
        participant: Participant,
        now: Timestamp,
    ) -> Result<JoinOutcome, RepositoryError>;

    /// 参加者を削除。Room が空になった場合は Room ごと削除する
    async fn remove_participant(
        &self,
        room_id: &RoomId,
        participant_id: &ParticipantId,
    ) -> Result<LeaveOutcome, RepositoryError>;

    /// タイマー操作を適用
    async fn apply_timer_action(
        &self,
        room_id: &RoomId,
        action: TimerAction,
        now: Timestamp,
    ) -> Result<TimerOutcome, RepositoryError>;

    /// タイマー実行中の Room の ID を取得
    async fn get_running_room_ids(&self) -> Vec<RoomId>;

    /// 1 ルームのタイマーを `now` まで進める
    async fn advance_timer(
        &self,
        room_id: &RoomId,
        now: Timestamp,
    ) -> Result<TickOutcome, RepositoryError>;

    /// 登録されている Room の数
    async fn count_rooms(&self) -> usize;
}
