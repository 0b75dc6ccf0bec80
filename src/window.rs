use anyhow::Context;
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use chip8vm::{
    display::{HEIGHT, PIXEL_ON, WIDTH},
    FrameBuffer, Keypad,
};

const COLOR_ON: u32 = 0x00_7F_FF;
const COLOR_OFF: u32 = 0x00_00_00;

// COSMAC VIP layout on the left of a QWERTY keyboard:
//   1 2 3 C      1 2 3 4
//   4 5 6 D      Q W E R
//   7 8 9 E      A S D F
//   A 0 B F      Z X C V
const KEY_MAP: [(Key, u8); 16] = [
    (Key::X, 0x0),
    (Key::Key1, 0x1),
    (Key::Key2, 0x2),
    (Key::Key3, 0x3),
    (Key::Q, 0x4),
    (Key::W, 0x5),
    (Key::E, 0x6),
    (Key::A, 0x7),
    (Key::S, 0x8),
    (Key::D, 0x9),
    (Key::Z, 0xA),
    (Key::C, 0xB),
    (Key::Key4, 0xC),
    (Key::R, 0xD),
    (Key::F, 0xE),
    (Key::V, 0xF),
];

pub struct Screen {
    window: Window,
    pixel_buffer: Vec<u32>,
}

impl Screen {
    pub fn new(scale: usize) -> anyhow::Result<Self> {
        let scale = match scale {
            1 => Scale::X1,
            2 => Scale::X2,
            4 => Scale::X4,
            8 => Scale::X8,
            16 => Scale::X16,
            32 => Scale::X32,
            other => anyhow::bail!("unsupported window scale {other}"),
        };
        let mut window = Window::new(
            "chip8vm - ESC to exit",
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale,
                ..WindowOptions::default()
            },
        )
        .context("could not open window")?;
        // Limit to max ~60 fps update rate
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));
        Ok(Self {
            window,
            pixel_buffer: vec![COLOR_OFF; WIDTH * HEIGHT],
        })
    }

    pub fn is_running(&self) -> bool {
        self.window.is_open() && !self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    /// Rewrites the whole keypad from what the window currently holds down.
    pub fn read_keys(&self, keypad: &mut Keypad) {
        for (key, num) in KEY_MAP {
            keypad.set(num, self.window.is_key_down(key));
        }
    }

    pub fn sync(&mut self, fb: &FrameBuffer) -> anyhow::Result<()> {
        for (dst, &src) in self.pixel_buffer.iter_mut().zip(fb.pixels()) {
            *dst = if src == PIXEL_ON { COLOR_ON } else { COLOR_OFF };
        }
        self.window
            .update_with_buffer(&self.pixel_buffer, WIDTH, HEIGHT)
            .context("could not present frame")
    }
}
