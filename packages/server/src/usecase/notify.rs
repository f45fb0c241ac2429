//! Broadcast helpers shared by the timer use cases.

use crate::domain::{MessagePusher, Room, RoomEvent, SessionCompletion};

/// Broadcast `event` to every participant of `room`, logging delivery errors.
pub(super) async fn broadcast_to_room(pusher: &dyn MessagePusher, room: &Room, event: RoomEvent) {
    if let Err(e) = pusher.broadcast(room.participant_ids(), &event).await {
        tracing::warn!(
            "Failed to broadcast '{}' to room '{}': {}",
            event.name(),
            room.id,
            e
        );
    }
}

/// `session-completed` followed by one `achievement-unlocked` per newly reached milestone.
pub(super) async fn broadcast_session_completed(
    pusher: &dyn MessagePusher,
    room: &Room,
    completion: &SessionCompletion,
) {
    tracing::info!(
        "Room '{}' completed a {} session ({} total), next: {}",
        room.id,
        completion.finished,
        completion.sessions_completed,
        completion.next
    );
    broadcast_to_room(pusher, room, RoomEvent::SessionCompleted(room.clone())).await;

    for achievement in &completion.unlocked {
        tracing::info!("Room '{}' unlocked '{}'", room.id, achievement.id());
        broadcast_to_room(
            pusher,
            room,
            RoomEvent::AchievementUnlocked {
                room_id: room.id.clone(),
                achievement: *achievement,
            },
        )
        .await;
    }
}
