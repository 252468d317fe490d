//! Boundary between the replay core and whatever draws it.
//!
//! The controller only ever asks a [`Renderer`] where rooms are, which curve a
//! tunnel follows, and tells it where to put an ant. [`SceneLayout`] is the
//! headless implementation used by the CLI and the tests.

use crate::ant::AntId;
use crate::world::ParsedGraph;
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::TAU;
use std::ops::{Add, Mul, Sub};
use std::sync::{Mutex, PoisonError};

/// Ants resting in one room are spread over rings of this many slots
const RING_SLOTS: usize = 8;
/// Resting ants float this far above their room
const REST_LIFT: f64 = 2.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation, `t = 0` is `self`
    #[inline]
    pub fn lerp(self, to: Vec3, t: f64) -> Vec3 {
        self + (to - self) * t
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f64 {
        let d = other - self;
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Curve an ant follows through a tunnel: a quadratic arc from `start` to
/// `end` passing through a midpoint lifted by a tenth of the tunnel length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TunnelPath {
    start: Vec3,
    control: Vec3,
    end: Vec3,
}

impl TunnelPath {
    pub fn between(start: Vec3, end: Vec3) -> Self {
        let mut mid = start.lerp(end, 0.5);
        mid.y += start.distance(end) * 0.1;
        // control point that makes the arc pass through `mid` at t = 0.5
        let control = mid * 2.0 - (start + end) * 0.5;
        Self {
            start,
            control,
            end,
        }
    }

    /// Point at curve parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// Same curve walked the other way
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            control: self.control,
            end: self.start,
        }
    }
}

/// What the replay core needs from a scene
pub trait Renderer: Send + Sync + 'static {
    /// World position of a room's centre
    fn room_position(&self, room: &str) -> Option<Vec3>;

    /// Curve of the tunnel walked from `from` to `to`, if the scene has one
    fn tunnel_path(&self, _from: &str, _to: &str) -> Option<TunnelPath> {
        None
    }

    /// Move an ant's visual to `position`
    fn place_ant(&self, ant: AntId, position: Vec3);
}

/// Offset of the `slot`-th ant resting in a room, relative to the room centre
pub fn rest_offset(slot: usize) -> Vec3 {
    let angle = (slot % RING_SLOTS) as f64 * TAU / RING_SLOTS as f64;
    let radius = 3.0 + (slot / RING_SLOTS) as f64 * 2.0;
    Vec3::new(angle.cos() * radius, REST_LIFT, angle.sin() * radius)
}

/// Place every ant at rest around the room it occupies
pub fn place_at_rest(renderer: &dyn Renderer, positions: &BTreeMap<AntId, String>) {
    let mut occupancy: HashMap<&str, usize> = HashMap::new();
    for (&ant, room) in positions {
        let Some(centre) = renderer.room_position(room) else {
            continue;
        };
        let slot = occupancy.entry(room.as_str()).or_default();
        renderer.place_ant(ant, centre + rest_offset(*slot));
        *slot += 1;
    }
}

/// Headless scene: scaled room coordinates, tunnel curves, last ant positions
pub struct SceneLayout {
    rooms: HashMap<String, Vec3>,
    tunnels: HashMap<(String, String), TunnelPath>,
    ants: Mutex<BTreeMap<AntId, Vec3>>,
}

impl SceneLayout {
    pub const DEFAULT_SCALE: f64 = 10.0;

    /// Lay out `graph`, multiplying coordinates by `scale`.
    ///
    /// Rooms declared without a depth get a random one so flat maps do not
    /// collapse onto a single plane.
    pub fn new(graph: &ParsedGraph, scale: f64, rng: &mut fastrand::Rng) -> Self {
        let spread = 0.5 * graph.rooms().len() as f64;
        let rooms: HashMap<String, Vec3> = graph
            .rooms()
            .iter()
            .map(|room| {
                let z = room.z.unwrap_or_else(|| rng.f64() * spread);
                (room.id.clone(), Vec3::new(room.x, room.y, z) * scale)
            })
            .collect();

        let mut tunnels = HashMap::with_capacity(graph.tunnels().len() * 2);
        for tunnel in graph.tunnels() {
            if let (Some(&a), Some(&b)) = (rooms.get(&tunnel.from), rooms.get(&tunnel.to)) {
                let path = TunnelPath::between(a, b);
                tunnels.insert((tunnel.to.clone(), tunnel.from.clone()), path.reversed());
                tunnels.insert((tunnel.from.clone(), tunnel.to.clone()), path);
            }
        }

        Self {
            rooms,
            tunnels,
            ants: Mutex::new(BTreeMap::new()),
        }
    }

    /// Last position an ant was placed at
    pub fn ant_position(&self, ant: AntId) -> Option<Vec3> {
        self.ants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ant)
            .copied()
    }
}

impl Renderer for SceneLayout {
    fn room_position(&self, room: &str) -> Option<Vec3> {
        self.rooms.get(room).copied()
    }

    fn tunnel_path(&self, from: &str, to: &str) -> Option<TunnelPath> {
        self.tunnels.get(&(from.to_string(), to.to_string())).copied()
    }

    fn place_ant(&self, ant: AntId, position: Vec3) {
        self.ants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ant, position);
    }
}
