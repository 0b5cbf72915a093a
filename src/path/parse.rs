use serde::{Deserialize, Serialize};

use crate::error::{SparklineError, SparklineResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Path command with absolute coordinates.
///
/// Shorthand forms (`H`, `V`, `S`, `T`) and relative commands are resolved
/// while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    CubicTo { c1: Point, c2: Point, to: Point },
    Close,
}

/// Parses SVG path data (`M L H V C S Q T Z`, absolute and relative).
pub fn parse_path(data: &str) -> SparklineResult<Vec<PathCommand>> {
    PathParser::new(data).parse()
}

struct PathParser<'a> {
    bytes: &'a [u8],
    pos: usize,
    current: Point,
    subpath_start: Point,
    last_cubic_control: Option<Point>,
    last_quad_control: Option<Point>,
    commands: Vec<PathCommand>,
}

impl<'a> PathParser<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            bytes: data.as_bytes(),
            pos: 0,
            current: Point::default(),
            subpath_start: Point::default(),
            last_cubic_control: None,
            last_quad_control: None,
            commands: Vec::new(),
        }
    }

    fn parse(mut self) -> SparklineResult<Vec<PathCommand>> {
        self.skip_separators();
        if self.pos >= self.bytes.len() {
            return Ok(self.commands);
        }

        let mut command: Option<u8> = None;
        while self.pos < self.bytes.len() {
            let byte = self.bytes[self.pos];
            let letter = if byte.is_ascii_alphabetic() {
                self.pos += 1;
                byte
            } else {
                match command {
                    // extra coordinate pairs after a move are implicit lines
                    Some(b'M') => b'L',
                    Some(b'm') => b'l',
                    Some(b'Z' | b'z') | None => {
                        return Err(self.error("expected a command letter"));
                    }
                    Some(previous) => previous,
                }
            };

            if command.is_none() && !matches!(letter, b'M' | b'm') {
                return Err(self.error("path data must start with a move command"));
            }

            self.apply(letter)?;
            command = Some(letter);
            self.skip_separators();
        }

        Ok(self.commands)
    }

    fn apply(&mut self, letter: u8) -> SparklineResult<()> {
        let relative = letter.is_ascii_lowercase();
        let origin = if relative {
            self.current
        } else {
            Point::default()
        };

        match letter.to_ascii_uppercase() {
            b'M' => {
                let to = self.point(origin)?;
                self.commands.push(PathCommand::MoveTo(to));
                self.subpath_start = to;
                self.finish_segment(to, None, None);
            }
            b'L' => {
                let to = self.point(origin)?;
                self.commands.push(PathCommand::LineTo(to));
                self.finish_segment(to, None, None);
            }
            b'H' => {
                let x = self.number()? + origin.x;
                let to = Point::new(x, self.current.y);
                self.commands.push(PathCommand::LineTo(to));
                self.finish_segment(to, None, None);
            }
            b'V' => {
                let y = self.number()? + origin.y;
                let to = Point::new(self.current.x, y);
                self.commands.push(PathCommand::LineTo(to));
                self.finish_segment(to, None, None);
            }
            b'C' => {
                let c1 = self.point(origin)?;
                let c2 = self.point(origin)?;
                let to = self.point(origin)?;
                self.commands.push(PathCommand::CubicTo { c1, c2, to });
                self.finish_segment(to, Some(c2), None);
            }
            b'S' => {
                let c1 = reflect(self.last_cubic_control, self.current);
                let c2 = self.point(origin)?;
                let to = self.point(origin)?;
                self.commands.push(PathCommand::CubicTo { c1, c2, to });
                self.finish_segment(to, Some(c2), None);
            }
            b'Q' => {
                let control = self.point(origin)?;
                let to = self.point(origin)?;
                self.commands.push(PathCommand::QuadTo { control, to });
                self.finish_segment(to, None, Some(control));
            }
            b'T' => {
                let control = reflect(self.last_quad_control, self.current);
                let to = self.point(origin)?;
                self.commands.push(PathCommand::QuadTo { control, to });
                self.finish_segment(to, None, Some(control));
            }
            b'Z' => {
                self.commands.push(PathCommand::Close);
                let start = self.subpath_start;
                self.finish_segment(start, None, None);
            }
            b'A' => return Err(self.error("arc commands are not supported")),
            _ => return Err(self.error("unknown path command")),
        }
        Ok(())
    }

    fn finish_segment(&mut self, to: Point, cubic: Option<Point>, quad: Option<Point>) {
        self.current = to;
        self.last_cubic_control = cubic;
        self.last_quad_control = quad;
    }

    fn point(&mut self, origin: Point) -> SparklineResult<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::new(origin.x + x, origin.y + y))
    }

    fn number(&mut self) -> SparklineResult<f64> {
        self.skip_separators();
        let start = self.pos;
        let bytes = self.bytes;

        if matches!(bytes.get(self.pos), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let integer_digits = self.digits();
        let mut fraction_digits = 0;
        if bytes.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            fraction_digits = self.digits();
        }
        if integer_digits == 0 && fraction_digits == 0 {
            self.pos = start;
            return Err(self.error("expected a number"));
        }
        if matches!(bytes.get(self.pos), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(bytes.get(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                // "e" belongs to whatever follows, not to this number
                self.pos = mark;
            }
        }

        let text = std::str::from_utf8(&bytes[start..self.pos])
            .map_err(|_| self.error("number is not valid utf-8"))?;
        text.parse::<f64>()
            .map_err(|_| self.error("malformed number"))
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn skip_separators(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|byte| byte.is_ascii_whitespace() || *byte == b',')
        {
            self.pos += 1;
        }
    }

    fn error(&self, reason: &str) -> SparklineError {
        SparklineError::InvalidPath {
            offset: self.pos,
            reason: reason.to_owned(),
        }
    }
}

fn reflect(control: Option<Point>, around: Point) -> Point {
    match control {
        Some(control) => Point::new(2.0 * around.x - control.x, 2.0 * around.y - control.y),
        None => around,
    }
}

#[cfg(test)]
mod tests {
    use super::{PathCommand, Point, parse_path};

    #[test]
    fn relative_commands_resolve_to_absolute() {
        let commands = parse_path("m10,10 l5,0 v5 h-5 z").expect("valid path");
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(Point::new(10.0, 10.0)),
                PathCommand::LineTo(Point::new(15.0, 10.0)),
                PathCommand::LineTo(Point::new(15.0, 15.0)),
                PathCommand::LineTo(Point::new(10.0, 15.0)),
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn implicit_repeats_and_compact_numbers_parse() {
        let commands = parse_path("M0 0 1-1.5.5 2e1").expect("valid path");
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(1.0, -1.5)),
                PathCommand::LineTo(Point::new(0.5, 20.0)),
            ]
        );
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let commands = parse_path("M0,0C0,10,10,10,10,0S20,-10,20,0").expect("valid path");
        assert_eq!(
            commands[2],
            PathCommand::CubicTo {
                c1: Point::new(10.0, -10.0),
                c2: Point::new(20.0, -10.0),
                to: Point::new(20.0, 0.0),
            }
        );
    }

    #[test]
    fn arcs_are_rejected() {
        let err = parse_path("M0,0A5,5,0,0,1,10,10").expect_err("arc must fail");
        assert!(format!("{err}").contains("arc"));
    }

    #[test]
    fn data_must_begin_with_move() {
        let err = parse_path("L1,1").expect_err("missing move must fail");
        assert!(format!("{err}").contains("move command"));
    }

    #[test]
    fn empty_data_has_no_commands() {
        assert!(parse_path("   ").expect("blank path").is_empty());
    }
}
