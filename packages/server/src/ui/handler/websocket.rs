//! WebSocket connection handlers.
//!
//! One connection is one participant identity. The connection may join several
//! rooms; all of them are left when the socket closes.

use std::{collections::BTreeSet, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ParticipantId, PusherChannel, RoomEvent, RoomId, TimerAction},
    infrastructure::dto::websocket::{ClientCommand, ServerMessage},
    ui::state::AppState,
};

/// Rooms joined through one connection
type JoinedRooms = Arc<Mutex<BTreeSet<RoomId>>>;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Send a `command-error` frame to this connection only.
fn reply_error(reply: &PusherChannel, reason: String, room_id: Option<String>) {
    let event = RoomEvent::CommandError { reason, room_id };
    match ServerMessage::from(&event).to_json() {
        Ok(json) => {
            if reply.send(json).is_err() {
                tracing::debug!("Connection closed before command-error could be sent");
            }
        }
        Err(e) => tracing::error!("Failed to encode command-error: {}", e),
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let reply = tx.clone();

    let participant_id = match state.connect_client_usecase.execute(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to register connection: {}", e);
            return;
        }
    };
    tracing::info!("Connection '{}' opened", participant_id);

    let joined: JoinedRooms = Arc::new(Mutex::new(BTreeSet::new()));

    let state_clone = state.clone();
    let joined_clone = joined.clone();
    let participant_clone = participant_id.clone();

    // Spawn a task to receive commands from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", participant_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", participant_clone, text);
                    match serde_json::from_str::<ClientCommand>(text.as_str()) {
                        Ok(command) => {
                            handle_command(
                                &state_clone,
                                &participant_clone,
                                &joined_clone,
                                &reply,
                                command,
                            )
                            .await
                        }
                        Err(e) => {
                            tracing::warn!("Unparseable command from '{}': {}", participant_clone, e);
                            reply_error(&reply, format!("Invalid command: {e}"), None);
                        }
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", participant_clone);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to push room events to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let rooms: Vec<RoomId> = joined.lock().await.iter().cloned().collect();
    state
        .disconnect_client_usecase
        .execute(&participant_id, rooms)
        .await;
}

async fn handle_command(
    state: &AppState,
    participant_id: &ParticipantId,
    joined: &JoinedRooms,
    reply: &PusherChannel,
    command: ClientCommand,
) {
    let room_id = command.room_id().to_string();

    let result: Result<(), String> = match command {
        ClientCommand::JoinRoom { user_name, .. } => {
            join(state, participant_id, joined, &room_id, user_name).await
        }
        ClientCommand::LeaveRoom { .. } => {
            let result = state
                .leave_room_usecase
                .execute(&room_id, participant_id)
                .await;
            joined.lock().await.retain(|id| id.as_str() != room_id);
            result.map(|_| ()).map_err(|e| e.to_string())
        }
        ClientCommand::StartTimer { .. } => control(state, &room_id, TimerAction::Start).await,
        ClientCommand::PauseTimer { .. } => control(state, &room_id, TimerAction::Pause).await,
        ClientCommand::CompleteSession { .. } => control(state, &room_id, TimerAction::Skip).await,
        ClientCommand::ResetTimer { .. } => control(state, &room_id, TimerAction::Reset).await,
    };

    if let Err(reason) = result {
        tracing::warn!(
            "Rejected command from '{}' for room '{}': {}",
            participant_id,
            room_id,
            reason
        );
        reply_error(reply, reason, Some(room_id));
    }
}

/// Join a room, recording it for disconnect cleanup before the join is committed.
///
/// The record must exist whenever the participant may be in the room, including
/// when this future is dropped between the commit and its notifications.
async fn join(
    state: &AppState,
    participant_id: &ParticipantId,
    joined: &JoinedRooms,
    room_id: &str,
    user_name: Option<String>,
) -> Result<(), String> {
    let tracked = RoomId::new(room_id.to_string()).ok();
    let newly_tracked = match &tracked {
        Some(id) => joined.lock().await.insert(id.clone()),
        None => false,
    };

    let result = state
        .join_room_usecase
        .execute(room_id, participant_id.clone(), user_name)
        .await;

    if let (Err(_), true, Some(id)) = (&result, newly_tracked, &tracked) {
        joined.lock().await.remove(id);
    }
    result.map(|_| ()).map_err(|e| e.to_string())
}

async fn control(state: &AppState, room_id: &str, action: TimerAction) -> Result<(), String> {
    state
        .control_timer_usecase
        .execute(room_id, action)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shuchu_shared::time::FixedClock;

    use crate::{
        domain::{
            MessagePushError, MessagePusher, ParticipantName, Room, RoomRepository, Timestamp,
        },
        infrastructure::repository::InMemoryRoomRepository,
    };

    /// Pusher whose direct sends never complete (a client that stopped reading)
    struct StallingPusher;

    #[async_trait]
    impl MessagePusher for StallingPusher {
        async fn register_client(&self, _client_id: ParticipantId, _sender: PusherChannel) {}

        async fn unregister_client(&self, _client_id: &ParticipantId) {}

        async fn push_to(
            &self,
            _client_id: &ParticipantId,
            _event: &RoomEvent,
        ) -> Result<(), MessagePushError> {
            std::future::pending().await
        }

        async fn broadcast(
            &self,
            _targets: Vec<ParticipantId>,
            _event: &RoomEvent,
        ) -> Result<(), MessagePushError> {
            Ok(())
        }
    }

    async fn setup() -> (Arc<AppState>, Arc<InMemoryRoomRepository>, RoomId) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let room_id = RoomId::new("ab12cd34".to_string()).unwrap();
        repository
            .insert_room(Room::new(
                room_id.clone(),
                ParticipantName::anonymous(),
                Timestamp::new(0),
            ))
            .await
            .unwrap();
        let state = Arc::new(AppState::new(
            repository.clone(),
            Arc::new(StallingPusher),
            Arc::new(FixedClock::new(0)),
        ));
        (state, repository, room_id)
    }

    #[tokio::test]
    async fn test_join_interrupted_after_commit_is_left_on_disconnect() {
        // テスト項目: 参加の確定後に接続が切れて処理が中断されても、切断処理でルームから退出する
        // given (前提条件):
        let (state, repository, room_id) = setup().await;
        let participant_id = ParticipantId::new("alice".to_string()).unwrap();
        let joined: JoinedRooms = Arc::default();
        let task = {
            let state = state.clone();
            let participant_id = participant_id.clone();
            let joined = joined.clone();
            tokio::spawn(async move {
                join(&state, &participant_id, &joined, "ab12cd34", None).await
            })
        };
        let committed = async {
            while !repository
                .get_room(&room_id)
                .await
                .unwrap()
                .has_participant(&participant_id)
            {
                tokio::task::yield_now().await;
            }
        };
        tokio::time::timeout(std::time::Duration::from_secs(5), committed)
            .await
            .unwrap();

        // when (操作): room-state の送信待ちの間に中断し、切断処理を行う
        task.abort();
        assert!(task.await.is_err());
        let rooms: Vec<RoomId> = joined.lock().await.iter().cloned().collect();
        state
            .disconnect_client_usecase
            .execute(&participant_id, rooms.clone())
            .await;

        // then (期待する結果):
        assert_eq!(rooms, vec![room_id]);
        assert_eq!(repository.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_failed_join_is_not_recorded() {
        // テスト項目: 存在しないルームへの参加は記録に残らない
        // given (前提条件):
        let (state, _repository, _room_id) = setup().await;
        let participant_id = ParticipantId::new("alice".to_string()).unwrap();
        let joined: JoinedRooms = Arc::default();

        // when (操作):
        let result = join(&state, &participant_id, &joined, "deadbeef", None).await;

        // then (期待する結果):
        assert_eq!(result, Err("Room not found".to_string()));
        assert!(joined.lock().await.is_empty());
    }

    #[test]
    fn test_reply_error_encodes_command_error() {
        // テスト項目: command-error はこの接続にだけ JSON で送られる
        // given (前提条件):
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        reply_error(&tx, "Room not found".to_string(), Some("deadbeef".to_string()));

        // then (期待する結果):
        assert_eq!(
            rx.try_recv().unwrap(),
            r#"{"type":"command-error","reason":"Room not found","roomId":"deadbeef"}"#
        );
    }
}
