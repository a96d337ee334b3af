//! Fixed-point trigonometry for dial angles
//!
//! A full circle is 288 steps of 1.25°. Sines are scaled so that 1.0 is
//! 256, which lets the rasterizer use `component * radius / 256` as a
//! pixel distance.

/// Steps in one full turn
pub const STEPS_PER_TURN: u16 = 288;

const HALF_TURN: u16 = STEPS_PER_TURN / 2;
const QUARTER_TURN: u16 = STEPS_PER_TURN / 4;

/// Offset that puts dial angle 0 twenty degrees clockwise past 6 o'clock
const DIAL_ZERO: i32 = 272;

/// Sine for steps 0..70. Steps 70, 71 and 72 round to 256, which does not
/// fit a byte.
const SINES: [u8; 70] = [
    0x00, 0x06, 0x0b, 0x11, 0x16, 0x1c, 0x21, 0x27, 0x2c, 0x32, 0x37, 0x3d, //
    0x42, 0x48, 0x4d, 0x52, 0x58, 0x5d, 0x62, 0x67, 0x6c, 0x71, 0x76, 0x7b, //
    0x80, 0x85, 0x8a, 0x8e, 0x93, 0x97, 0x9c, 0xa0, 0xa5, 0xa9, 0xad, 0xb1, //
    0xb5, 0xb9, 0xbd, 0xc0, 0xc4, 0xc8, 0xcb, 0xce, 0xd2, 0xd5, 0xd8, 0xdb, //
    0xde, 0xe0, 0xe3, 0xe6, 0xe8, 0xea, 0xed, 0xef, 0xf1, 0xf2, 0xf4, 0xf6, //
    0xf7, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xfe, 0xff, 0xff,
];

/// Screen-space direction, each component in -256..=256
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector {
    pub dx: i16,
    pub dy: i16,
}

impl Vector {
    pub const fn new(dx: i16, dy: i16) -> Self {
        Self { dx, dy }
    }

    /// Length of `radius` pixels along the dominant axis
    pub fn dominant_extent(&self, radius: u16) -> i32 {
        let dominant = i32::from(self.dx.unsigned_abs().max(self.dy.unsigned_abs()));
        dominant * i32::from(radius) / 256
    }
}

/// Sine of `step` (288ths of a turn), scaled by 256
pub fn sine(step: u16) -> i16 {
    let step = step % STEPS_PER_TURN;
    let (step, sign) = if step > HALF_TURN {
        (step - HALF_TURN, -1)
    } else {
        (step, 1)
    };
    let step = if step > QUARTER_TURN {
        HALF_TURN - step
    } else {
        step
    };

    let magnitude = match SINES.get(usize::from(step)) {
        Some(&value) => i16::from(value),
        None => 256,
    };
    sign * magnitude
}

/// Direction of a dial pointer at `angle` (0..=256 covers the scale)
///
/// Angles run clockwise from 20° past 6 o'clock. The mapping repeats
/// every [`STEPS_PER_TURN`].
pub fn unit_vector(angle: u16) -> Vector {
    let step = (DIAL_ZERO - i32::from(angle)).rem_euclid(i32::from(STEPS_PER_TURN)) as u16;
    Vector {
        dx: sine(step),
        dy: sine((step + QUARTER_TURN) % STEPS_PER_TURN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_cardinal_points() {
        assert_eq!(sine(0), 0);
        assert_eq!(sine(72), 256);
        assert_eq!(sine(144), 0);
        assert_eq!(sine(216), -256);
        assert_eq!(sine(288), 0);
    }

    #[test]
    fn test_sine_clamps_near_peak() {
        assert_eq!(sine(69), 0xff);
        assert_eq!(sine(70), 256);
        assert_eq!(sine(71), 256);
        assert_eq!(sine(74), 256);
        assert_eq!(sine(75), 0xff);
    }

    #[test]
    fn test_sine_symmetry() {
        for step in 0..=HALF_TURN {
            assert_eq!(sine(step), sine(HALF_TURN - step), "step {}", step);
            assert_eq!(sine(step + HALF_TURN), -sine(step), "step {}", step);
        }
    }

    #[test]
    fn test_unit_vector_periodic() {
        assert_eq!(unit_vector(0), unit_vector(288));
        for angle in 0..=256 {
            assert_eq!(unit_vector(angle), unit_vector(angle + STEPS_PER_TURN));
        }
    }

    #[test]
    fn test_dial_zero_points_down_left() {
        // 20° clockwise past 6 o'clock on a y-down screen
        let v = unit_vector(0);
        assert_eq!(v, Vector::new(-0x58, 0xf1));
    }

    #[test]
    fn test_dial_midpoint_points_up() {
        // 128 steps = 160°, so the middle of the scale sits at 12 o'clock
        let v = unit_vector(128);
        assert_eq!(v, Vector::new(0, -256));
    }

    #[test]
    fn test_dominant_extent() {
        let v = Vector::new(-0x58, 0xf1);
        assert_eq!(v.dominant_extent(35), 0xf1 * 35 / 256);
        assert_eq!(Vector::new(-256, 10).dominant_extent(5), 5);
    }
}
