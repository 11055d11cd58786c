//! Minimal boilerplate example — builds turtle programs programmatically
//! and animates them in the terminal.
//!
//! Run with: cargo run --example shapes

use term_turtle::{
    Driver, Instruction, TerminalConfig, TerminalSurface, WallClockScheduler, repeat,
    types::Point,
};

fn polygon(sides: usize, size: f64) -> Vec<Instruction> {
    vec![
        Instruction::pen_down(),
        repeat(
            sides,
            vec![
                Instruction::forward(size),
                Instruction::right(360.0 / sides as f64),
            ],
        ),
        Instruction::pen_up(),
    ]
}

fn main() -> anyhow::Result<()> {
    let surface = TerminalSurface::new(TerminalConfig::default())?;
    let mut driver = Driver::new(WallClockScheduler::new(60), surface);

    // Polygons wind downward from their start, so sit them in the upper
    // half of the default ±57-unit vertical range.
    driver.draw(polygon(3, 40.0), Point::new(-60.0, 20.0), 80.0)?;
    driver.draw(polygon(4, 40.0), Point::new(-20.0, 20.0), 80.0)?;
    driver.draw(polygon(6, 25.0), Point::new(40.0, 20.0), 80.0)?;

    // Leave the composition up briefly before the surface drop restores
    // the terminal.
    std::thread::sleep(std::time::Duration::from_secs(3));
    Ok(())
}
