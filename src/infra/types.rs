use std::fmt;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance, rounded up so a range check never passes a point that is actually inside.
    pub fn distance(&self, other: &Position) -> i32 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt().ceil() as i32
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    pub fn is_in_board(&self, board_size: i32) -> bool {
        (0..board_size).contains(&self.x) && (0..board_size).contains(&self.y)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        self.offset(rhs.x, rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Coarse board region reported by a radar blip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Definition order, also the tie-break order for targeting
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TL" => Some(Quadrant::TopLeft),
            "TR" => Some(Quadrant::TopRight),
            "BL" => Some(Quadrant::BottomLeft),
            "BR" => Some(Quadrant::BottomRight),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Quadrant::TopLeft => "TL",
            Quadrant::TopRight => "TR",
            Quadrant::BottomLeft => "BL",
            Quadrant::BottomRight => "BR",
        }
    }

    /// Board corner the quadrant points at
    pub fn anchor(&self, board_size: i32) -> Position {
        let far = board_size - 1;
        match self {
            Quadrant::TopLeft => Position::new(0, 0),
            Quadrant::TopRight => Position::new(far, 0),
            Quadrant::BottomLeft => Position::new(0, far),
            Quadrant::BottomRight => Position::new(far, far),
        }
    }

    /// Unit step signs (dx, dy); y grows downward
    pub fn direction(&self) -> (i32, i32) {
        match self {
            Quadrant::TopLeft => (-1, -1),
            Quadrant::TopRight => (1, -1),
            Quadrant::BottomLeft => (-1, 1),
            Quadrant::BottomRight => (1, 1),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}
