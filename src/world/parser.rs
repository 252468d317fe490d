use crate::ant::Move;
use crate::error::{ParseError, Result, ValidationError};
use crate::role::RoomRole;
use crate::world::graph::ParsedGraph;
use crate::world::room::{Room, Tunnel};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Parse an ant farm from a file path
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedGraph> {
    let src = fs::read_to_string(path)?;
    parse(&src)
}

/// Parse an ant farm from its text form.
///
/// The scan is a fold over numbered lines; nothing is returned unless the
/// whole input is well formed and consistent.
pub fn parse(src: &str) -> Result<ParsedGraph> {
    src.lines()
        .enumerate()
        .try_fold(Scan::default(), |scan, (i, raw)| scan.feed(i + 1, raw))?
        .finish()
}

/// Shape of a non-comment line after the ant count
enum LineKind<'a> {
    Moves,
    Tunnel(&'a str, &'a str),
    Room(Vec<&'a str>),
}

fn classify(line: &str) -> Option<LineKind<'_>> {
    if line.starts_with('L') {
        return Some(LineKind::Moves);
    }
    if line.matches('-').count() == 1 && !line.contains(char::is_whitespace) {
        if let Some((from, to)) = line.split_once('-') {
            if !from.is_empty() && !to.is_empty() {
                return Some(LineKind::Tunnel(from, to));
            }
        }
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    matches!(tokens.len(), 3 | 4).then_some(LineKind::Room(tokens))
}

/// Accumulator threaded through the line fold
#[derive(Default)]
struct Scan {
    ant_count: Option<u32>,
    pending: Option<RoomRole>,
    rooms: Vec<(usize, Room)>,
    tunnels: Vec<(usize, Tunnel)>,
    moves: Vec<(usize, Move)>,
    turn: u32,
    last_line: usize,
}

impl Scan {
    fn feed(mut self, line_no: usize, raw: &str) -> Result<Self> {
        self.last_line = line_no;
        let line = raw.trim();
        if line.is_empty() {
            return Ok(self);
        }

        if line.starts_with('#') {
            if let Some(role) = RoomRole::from_marker(line) {
                if let Some(prev) = self.pending {
                    return Err(ParseError::format(
                        line_no,
                        format!("##{role} follows ##{prev} without a room in between"),
                    ));
                }
                self.pending = Some(role);
            }
            return Ok(self);
        }

        if self.ant_count.is_none() {
            self.ant_count = Some(parse_ant_count(line_no, line)?);
            return Ok(self);
        }

        match classify(line) {
            Some(LineKind::Moves) => self.moves_line(line_no, line)?,
            Some(LineKind::Tunnel(from, to)) => {
                self.tunnels.push((line_no, Tunnel::new(from, to)));
            }
            Some(LineKind::Room(tokens)) => self.room_line(line_no, &tokens)?,
            None => {
                return Err(ParseError::format(
                    line_no,
                    format!("expected a room 'id x y [z]', a tunnel 'a-b' or a moves line, got '{line}'"),
                ))
            }
        }
        Ok(self)
    }

    fn room_line(&mut self, line_no: usize, tokens: &[&str]) -> Result<()> {
        let coord = |s: &str| -> Result<f64> {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParseError::format(line_no, format!("invalid coordinate '{s}'")))
        };

        let x = coord(tokens[1])?;
        let y = coord(tokens[2])?;
        let z = tokens.get(3).copied().map(|s| coord(s)).transpose()?;
        let role = self.pending.take().unwrap_or_default();

        self.rooms.push((line_no, Room::new(tokens[0], x, y, z, role)));
        Ok(())
    }

    fn moves_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        self.turn += 1;
        for token in line.split_whitespace() {
            let (ant, room) = parse_move_token(token)
                .ok_or_else(|| ParseError::format(line_no, format!("expected 'L<ant>-<room>', got '{token}'")))?;
            self.moves.push((line_no, Move::new(ant, room, self.turn)));
        }
        Ok(())
    }

    fn finish(self) -> Result<ParsedGraph> {
        let ant_count = self
            .ant_count
            .ok_or_else(|| ParseError::format(self.last_line.max(1), "missing ant count"))?;

        let mut ids: HashSet<&str> = HashSet::with_capacity(self.rooms.len());
        let mut start: Option<usize> = None;
        let mut end: Option<usize> = None;

        for (i, (line, room)) in self.rooms.iter().enumerate() {
            if !ids.insert(&room.id) {
                return Err(ValidationError::DuplicateRoom {
                    line: *line,
                    room: room.id.clone(),
                }
                .into());
            }
            match room.role {
                RoomRole::Start if start.is_some() => {
                    return Err(ValidationError::DuplicateStart {
                        line: *line,
                        room: room.id.clone(),
                    }
                    .into())
                }
                RoomRole::End if end.is_some() => {
                    return Err(ValidationError::DuplicateEnd {
                        line: *line,
                        room: room.id.clone(),
                    }
                    .into())
                }
                RoomRole::Start => start = Some(i),
                RoomRole::End => end = Some(i),
                RoomRole::Normal => {}
            }
        }

        let start = start.ok_or(ValidationError::MissingStart)?;
        let end = end.ok_or(ValidationError::MissingEnd)?;

        for (line, tunnel) in &self.tunnels {
            for endpoint in [&tunnel.from, &tunnel.to] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(ValidationError::UnknownTunnelRoom {
                        line: *line,
                        room: endpoint.clone(),
                    }
                    .into());
                }
            }
        }

        let mut seen: HashMap<u32, HashSet<u32>> = HashMap::new();
        for (line, mv) in &self.moves {
            if !ids.contains(mv.room.as_str()) {
                return Err(ValidationError::UnknownMoveRoom {
                    line: *line,
                    ant: mv.ant,
                    room: mv.room.clone(),
                }
                .into());
            }
            if !seen.entry(mv.turn).or_default().insert(mv.ant) {
                return Err(ValidationError::DuplicateMove {
                    line: *line,
                    ant: mv.ant,
                    turn: mv.turn,
                }
                .into());
            }
        }

        Ok(ParsedGraph::from_parts(
            self.rooms.into_iter().map(|(_, r)| r).collect(),
            self.tunnels.into_iter().map(|(_, t)| t).collect(),
            ant_count,
            self.moves.into_iter().map(|(_, m)| m).collect(),
            start,
            end,
        ))
    }
}

fn parse_ant_count(line_no: usize, line: &str) -> Result<u32> {
    line.bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| line.parse::<u32>().ok())
        .flatten()
        .filter(|&n| n > 0)
        .ok_or_else(|| ParseError::format(line_no, format!("ant count must be a positive integer, got '{line}'")))
}

/// Split `L<digits>-<room>` into its ant id and room id
fn parse_move_token(token: &str) -> Option<(u32, &str)> {
    let (digits, room) = token.strip_prefix('L')?.split_once('-')?;
    if digits.is_empty() || room.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let ant: u32 = digits.parse().ok()?;
    (ant > 0).then_some((ant, room))
}
