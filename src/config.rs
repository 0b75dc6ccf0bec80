pub const DEFAULT_SCALE: usize = 16;
pub const DEFAULT_CYCLES_PER_FRAME: u32 = 10;

/// Settings for the windowed host. The interpreter itself has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// integer window scale, one of 1, 2, 4, 8, 16 or 32
    pub scale: usize,
    /// steps run between two presented frames; frames are capped at ~60/s
    pub cycles_per_frame: u32,
    /// fixed seed for `Cxkk`; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            cycles_per_frame: DEFAULT_CYCLES_PER_FRAME,
            seed: None,
        }
    }
}

impl Config {
    pub fn new(scale: usize, cycles_per_frame: u32, seed: Option<u64>) -> Self {
        Self {
            scale,
            cycles_per_frame: cycles_per_frame.max(1),
            seed,
        }
    }
}

#[test]
fn test_defaults() {
    assert_eq!(
        Config::default(),
        Config {
            scale: 16,
            cycles_per_frame: 10,
            seed: None,
        }
    );
}

#[test]
fn test_at_least_one_cycle_per_frame() {
    assert_eq!(Config::new(8, 0, None).cycles_per_frame, 1);
    assert_eq!(Config::new(8, 25, Some(3)).cycles_per_frame, 25);
}
