use app::core::{PlayerAnsweredPayload, TournamentAnswerPayload, TournamentEvent};
use socketioxide::{
    SocketIo,
    extract::{Data, SocketRef},
};
use tracing::{debug, warn};

/// Spectators subscribe to a tournament's room; players relay their answers
/// to everyone else in it. Subscriptions are not authenticated.
pub fn register_tournament_namespace(io: &SocketIo) {
    io.ns("/", async |socket: SocketRef| {
        debug!(socket_id = %socket.id, "socket connected");

        socket.on(
            "join-tournament",
            async |socket: SocketRef, Data(tournament_id): Data<String>| {
                debug!(socket_id = %socket.id, tournament_id = %tournament_id, "subscribed");
                socket.join(tournament_id);
            },
        );

        socket.on(
            "tournament-answer",
            async |socket: SocketRef, Data(payload): Data<TournamentAnswerPayload>| {
                let event = TournamentEvent::PlayerAnswered(PlayerAnsweredPayload {
                    player_id: socket.id.to_string(),
                    answer: payload.answer,
                    time_left: payload.time_left,
                });

                if let Err(e) = socket
                    .to(payload.tournament_id.clone())
                    .emit(event.name(), &event)
                    .await
                {
                    warn!(
                        tournament_id = %payload.tournament_id,
                        "Failed to relay player answer: {}", e
                    );
                }
            },
        );

        socket.on_disconnect(async |socket: SocketRef| {
            debug!(socket_id = %socket.id, "socket disconnected");
        });
    });
}
