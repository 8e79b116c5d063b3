use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{trace, warn};

use crate::infra::{Position, Quadrant, ReplayFile};
use crate::planners::Command;
use crate::state::{
    CollectionEvent, CreatureClass, CreatureDetail, MatchInfo, ObservedEntity, RadarBlip,
    TurnSnapshot, Unit, UnitRoster,
};

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input ended while reading {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("{record} line {line:?} has too few fields")]
    MissingField { record: &'static str, line: String },

    #[error("{record} field {token:?} is not an integer")]
    InvalidNumber { record: &'static str, token: String },

    #[error("unknown radar direction {0:?}")]
    UnknownDirection(String),

    #[error("creature {0} is not in the match metadata")]
    UnknownCreature(i32),

    #[error("drone {0} is not in this turn's drone list")]
    UnknownUnit(i32),
}

/// Line-protocol link to the game referee.
///
/// Owns the unit roster, so scans reported in earlier turns stay attached to their drones.
pub struct RefereeConnection<R, W> {
    lines: Lines<R>,
    output: W,
    roster: UnitRoster,
    replay_file: Option<ReplayFile>,
    turn: u32,
}

impl<R, W> RefereeConnection<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, replay_file: Option<ReplayFile>) -> Self {
        Self {
            lines: input.lines(),
            output,
            roster: UnitRoster::new(),
            replay_file,
            turn: 0,
        }
    }

    #[cfg(test)]
    pub fn roster(&self) -> &UnitRoster {
        &self.roster
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads the creature list sent once before the first turn
    pub async fn read_match_info(&mut self) -> Result<MatchInfo, ProtocolError> {
        let count = self.read_count("creature count").await?;
        let mut creatures = Vec::with_capacity(count);
        for _ in 0..count {
            let line = self.expect_line("creature").await?;
            let [id, color, kind] = parse_fields::<3>(&line, "creature")?;
            creatures.push((id, CreatureDetail::new(color, kind)));
        }
        Ok(MatchInfo::new(creatures))
    }

    /// Reads one turn. `None` when the input ends cleanly before a new turn starts.
    pub async fn read_turn(
        &mut self,
        info: &MatchInfo,
    ) -> Result<Option<TurnSnapshot>, ProtocolError> {
        let Some(line) = self.next_line().await? else {
            return Ok(None);
        };
        self.turn += 1;

        let [my_score] = parse_fields::<1>(&line, "my score")?;
        let [foe_score] = self.read_record::<1>("foe score").await?;
        let my_scans = self.read_scans("my scan").await?;
        let foe_scans = self.read_scans("foe scan").await?;
        let my_units = self.read_units("my drone").await?;
        let foe_units = self.read_units("foe drone").await?;

        let mut collections = Vec::new();
        for _ in 0..self.read_count("drone scan count").await? {
            let [unit_id, creature_id] = self.read_record::<2>("drone scan").await?;
            let known_unit = my_units
                .iter()
                .chain(foe_units.iter())
                .any(|unit| unit.id == unit_id);
            if !known_unit {
                return Err(ProtocolError::UnknownUnit(unit_id));
            }
            self.roster.apply_collection(unit_id, creature_id);
            collections.push(CollectionEvent {
                unit_id,
                creature_id,
            });
        }

        let mut snapshot = TurnSnapshot {
            turn: self.turn,
            my_score,
            foe_score,
            my_scans,
            foe_scans,
            my_units: self.roster.refresh(my_units),
            foe_units: self.roster.refresh(foe_units),
            collections,
            ..Default::default()
        };

        for _ in 0..self.read_count("visible creature count").await? {
            let [id, x, y, vx, vy] = self.read_record::<5>("visible creature").await?;
            let class = info.class_of(id).ok_or(ProtocolError::UnknownCreature(id))?;
            let entity = ObservedEntity {
                id,
                position: Position::new(x, y),
                velocity: Position::new(vx, vy),
                detail: class.detail(),
            };
            match class {
                CreatureClass::Threat(_) => snapshot.threats.push(entity),
                CreatureClass::Collectible(_) => snapshot.creatures.push(entity),
            }
        }

        let scanned = snapshot.scanned_by_us();
        for _ in 0..self.read_count("radar blip count").await? {
            let line = self.expect_line("radar blip").await?;
            let [unit_id, creature_id] = parse_fields::<2>(&line, "radar blip")?;
            let code = line
                .split_whitespace()
                .nth(2)
                .ok_or_else(|| ProtocolError::MissingField {
                    record: "radar blip",
                    line: line.clone(),
                })?;
            let quadrant = Quadrant::from_code(code)
                .ok_or_else(|| ProtocolError::UnknownDirection(code.to_string()))?;

            if !snapshot.my_units.iter().any(|unit| unit.id == unit_id) {
                return Err(ProtocolError::UnknownUnit(unit_id));
            }
            if !info.is_collectible(creature_id) || scanned.contains(&creature_id) {
                continue;
            }
            snapshot.radar_blips.push(RadarBlip {
                unit_id,
                creature_id,
                quadrant,
            });
        }

        Ok(Some(snapshot))
    }

    /// Writes one line per command and flushes
    pub async fn send(&mut self, commands: &[Command]) -> Result<(), ProtocolError> {
        for command in commands {
            let line = command.to_string();
            trace!("> {}", line);
            if let Some(ref mut replay_file) = self.replay_file {
                replay_file.record_output(&line)?;
            }
            self.output.write_all(line.as_bytes()).await?;
            self.output.write_all(b"\n").await?;
        }
        self.output.flush().await?;
        Ok(())
    }

    async fn next_line(&mut self) -> Result<Option<String>, ProtocolError> {
        let line = self.lines.next_line().await?;
        if let Some(ref line) = line {
            trace!("< {}", line);
            if let Some(ref mut replay_file) = self.replay_file
                && let Err(e) = replay_file.record_input(line)
            {
                warn!("Failed to record input line: {}", e);
            }
        }
        Ok(line)
    }

    async fn expect_line(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        self.next_line()
            .await?
            .ok_or(ProtocolError::UnexpectedEof { expected })
    }

    async fn read_record<const N: usize>(
        &mut self,
        record: &'static str,
    ) -> Result<[i32; N], ProtocolError> {
        let line = self.expect_line(record).await?;
        parse_fields(&line, record)
    }

    async fn read_count(&mut self, record: &'static str) -> Result<usize, ProtocolError> {
        let [count] = self.read_record::<1>(record).await?;
        usize::try_from(count).map_err(|_| ProtocolError::InvalidNumber {
            record,
            token: count.to_string(),
        })
    }

    async fn read_scans(&mut self, record: &'static str) -> Result<Vec<i32>, ProtocolError> {
        let count = self.read_count(record).await?;
        let mut scans = Vec::with_capacity(count);
        for _ in 0..count {
            let [creature_id] = self.read_record::<1>(record).await?;
            scans.push(creature_id);
        }
        Ok(scans)
    }

    async fn read_units(&mut self, record: &'static str) -> Result<Vec<Unit>, ProtocolError> {
        let count = self.read_count(record).await?;
        let mut units = Vec::with_capacity(count);
        for _ in 0..count {
            let [id, x, y, emergency, battery] = self.read_record::<5>(record).await?;
            units.push(Unit::new(id, Position::new(x, y), emergency == 1, battery));
        }
        Ok(units)
    }
}

fn parse_fields<const N: usize>(line: &str, record: &'static str) -> Result<[i32; N], ProtocolError> {
    let mut fields = [0; N];
    let mut tokens = line.split_whitespace();
    for field in fields.iter_mut() {
        let token = tokens.next().ok_or_else(|| ProtocolError::MissingField {
            record,
            line: line.to_string(),
        })?;
        *field = token.parse().map_err(|_| ProtocolError::InvalidNumber {
            record,
            token: token.to_string(),
        })?;
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCH_INFO: &str = "\
5
4 0 0
5 0 1
6 1 0
7 1 1
16 -1 -1
";

    fn connection(input: &str) -> RefereeConnection<&[u8], Vec<u8>> {
        RefereeConnection::new(input.as_bytes(), Vec::new(), None)
    }

    fn turn(drone_scans: &str, blips: &str) -> String {
        format!(
            "\
10
3
1
4
0
2
0 2000 3000 0 30
2 7000 3000 0 29
1
1 5000 4000 1 12
{drone_scans}2
6 2100 3500 0 0
16 2500 3500 -100 50
{blips}"
        )
    }

    #[test]
    fn test_parse_fields() {
        assert_eq!(parse_fields::<3>("1 -2  3", "t").unwrap(), [1, -2, 3]);
        assert!(matches!(
            parse_fields::<3>("1 2", "t"),
            Err(ProtocolError::MissingField { .. })
        ));
        assert!(matches!(
            parse_fields::<1>("x", "t"),
            Err(ProtocolError::InvalidNumber { .. })
        ));
    }

    #[tokio::test]
    async fn test_reads_match_info() {
        let mut conn = connection(MATCH_INFO);
        let info = conn.read_match_info().await.unwrap();
        assert_eq!(info.creature_count(), 5);
        assert!(info.class_of(16).unwrap().is_threat());
        assert!(info.is_collectible(7));
    }

    #[tokio::test]
    async fn test_reads_full_turn() {
        let input = format!(
            "{}{}",
            MATCH_INFO,
            turn("1\n0 5\n", "4\n0 4 TL\n0 6 BR\n2 7 TR\n2 16 BL\n")
        );
        let mut conn = connection(&input);
        let info = conn.read_match_info().await.unwrap();
        let snapshot = conn.read_turn(&info).await.unwrap().unwrap();

        assert_eq!(snapshot.turn, 1);
        assert_eq!((snapshot.my_score, snapshot.foe_score), (10, 3));
        assert_eq!(snapshot.my_scans, vec![4]);
        assert!(snapshot.foe_scans.is_empty());
        assert_eq!(snapshot.my_units.len(), 2);
        assert_eq!(snapshot.my_units[0].collected_ids, vec![5]);
        assert!(snapshot.foe_units[0].destroyed);
        assert_eq!(snapshot.collections, vec![CollectionEvent { unit_id: 0, creature_id: 5 }]);

        assert_eq!(snapshot.creatures.len(), 1);
        assert_eq!(snapshot.threats.len(), 1);
        assert_eq!(snapshot.projected_threats(), vec![Position::new(2400, 3550)]);

        // 4 is banked, 16 is a monster: only 6 and 7 remain
        let blips: Vec<(i32, i32, Quadrant)> = snapshot
            .radar_blips
            .iter()
            .map(|b| (b.unit_id, b.creature_id, b.quadrant))
            .collect();
        assert_eq!(blips, vec![(0, 6, Quadrant::BottomRight), (2, 7, Quadrant::TopRight)]);

        assert!(conn.read_turn(&info).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scans_accumulate_across_turns() {
        let input = format!(
            "{}{}{}",
            MATCH_INFO,
            turn("1\n0 5\n", "0\n"),
            turn("1\n2 7\n", "1\n0 5 TL\n")
        );
        let mut conn = connection(&input);
        let info = conn.read_match_info().await.unwrap();
        conn.read_turn(&info).await.unwrap().unwrap();
        let second = conn.read_turn(&info).await.unwrap().unwrap();

        assert_eq!(second.turn, 2);
        assert_eq!(second.my_units[0].collected_ids, vec![5]);
        assert_eq!(second.my_units[1].collected_ids, vec![7]);
        // Unit 0 still carries 5, so its blip is dropped
        assert!(second.radar_blips.is_empty());
        assert_eq!(conn.roster().collected_by(2), &[7]);
    }

    #[tokio::test]
    async fn test_truncated_turn_is_an_error() {
        let input = format!("{}10\n3\n", MATCH_INFO);
        let mut conn = connection(&input);
        let info = conn.read_match_info().await.unwrap();
        let err = conn.read_turn(&info).await.unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof { expected: "my scan" }));
    }

    #[tokio::test]
    async fn test_unknown_creature_is_rejected() {
        let input = format!(
            "{}{}",
            MATCH_INFO,
            turn("0\n", "0\n").replace("6 2100 3500 0 0", "42 2100 3500 0 0")
        );
        let mut conn = connection(&input);
        let info = conn.read_match_info().await.unwrap();
        let err = conn.read_turn(&info).await.unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownCreature(42)));
    }

    #[tokio::test]
    async fn test_bad_direction_is_rejected() {
        let input = format!("{}{}", MATCH_INFO, turn("0\n", "1\n0 6 UP\n"));
        let mut conn = connection(&input);
        let info = conn.read_match_info().await.unwrap();
        let err = conn.read_turn(&info).await.unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownDirection(ref code) if code == "UP"));
    }

    #[tokio::test]
    async fn test_send_writes_one_line_per_command() {
        let mut conn = connection("");
        conn.send(&[
            Command::Move {
                destination: Position::new(2000, 0),
                light: true,
            },
            Command::Wait { light: false },
        ])
        .await
        .unwrap();
        let output = String::from_utf8(conn.into_output()).unwrap();
        assert_eq!(output, "MOVE 2000 0 1\nWAIT 0\n");
    }
}
