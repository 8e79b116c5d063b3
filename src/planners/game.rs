use std::time::Instant;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::infra::{BotConfig, GameObserver, RefereeConnection};
use crate::planners::{Command, TurnController};

pub struct Game<R, W> {
    connection: RefereeConnection<R, W>,
    observer: Box<dyn GameObserver>,
    config: BotConfig,
}

impl<R, W> Game<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        connection: RefereeConnection<R, W>,
        observer: impl GameObserver + 'static,
        config: BotConfig,
    ) -> Self {
        Self {
            connection,
            observer: Box::new(observer),
            config,
        }
    }

    #[cfg(test)]
    pub fn into_connection(self) -> RefereeConnection<R, W> {
        self.connection
    }

    /// Plays until the referee closes the input. Returns the number of turns played.
    pub async fn run(&mut self) -> Result<u32, Box<dyn std::error::Error>> {
        let info = self.connection.read_match_info().await?;
        self.observer.on_match_start(&info, &self.config);

        let controller = TurnController::new(&info, &self.config);
        let mut turns_played = 0;

        while let Some(snapshot) = self.connection.read_turn(&info).await? {
            let turn_start = Instant::now();
            self.observer.on_turn_start(&snapshot);

            let decisions = controller.decide(&snapshot);
            self.observer.on_decisions(&snapshot, &decisions);

            let commands: Vec<Command> = decisions.iter().map(|d| d.command).collect();
            self.connection.send(&commands).await?;
            turns_played = snapshot.turn;

            let turn_duration = turn_start.elapsed();
            if turn_duration > self.config.turn_budget {
                self.observer
                    .on_slow_turn(snapshot.turn, turn_duration, self.config.turn_budget);
            }
        }

        self.observer.on_match_finished(turns_played);
        Ok(turns_played)
    }
}
