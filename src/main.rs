use std::{fs, process};

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode};

use term_turtle::{
    DrawTarget, Driver, Instruction, TerminalConfig, TerminalSurface, WallClockScheduler,
    compiler::Compiler,
    instructions::repeat,
    types::{CompiledDrawing, CompiledProgram, PlayFile, Point, Program},
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const COMPILE_USAGE: &str = "term-turtle compile <program.json> <output.json>";
const DRAW_USAGE: &str = "term-turtle draw <program.json | compiled.json>";
const DEMO_USAGE: &str = "term-turtle demo";

const FPS: u32 = 60;

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("compile") => {
            let program_path = args.next().context(COMPILE_USAGE)?;
            let output_path = args.next().context(COMPILE_USAGE)?;
            compile(&program_path, &output_path)
        }
        Some("draw") => {
            let path = args.next().context(DRAW_USAGE)?;
            draw(&path)
        }
        Some("demo") => demo(),
        _ => bail!(
            "term-turtle — animated turtle graphics in the terminal\n\nUsage:\n  {COMPILE_USAGE}\n  {DRAW_USAGE}\n  {DEMO_USAGE}"
        ),
    }
}

fn compile(program_path: &str, output_path: &str) -> Result<()> {
    let json = fs::read_to_string(program_path)
        .with_context(|| format!("Failed to read {program_path}"))?;
    let program: Program =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse {program_path}"))?;

    let mut paths = Vec::with_capacity(program.drawings.len());
    for drawing in &program.drawings {
        let path = Compiler::compile_tree(&drawing.instructions)?;
        paths.push(CompiledDrawing {
            offset: drawing.offset,
            path,
            speed: drawing.speed,
        });
    }
    let compiled = CompiledProgram {
        speed: program.speed,
        paths,
    };

    let output_json = serde_json::to_string_pretty(&compiled)?;
    fs::write(output_path, &output_json)
        .with_context(|| format!("Failed to write {output_path}"))?;

    let total: f64 = compiled.paths.iter().map(|d| d.path.length()).sum();
    eprintln!(
        "Compiled {} paths ({total:.1} units) from {program_path} -> {output_path}",
        compiled.paths.len(),
    );

    Ok(())
}

fn draw(path: &str) -> Result<()> {
    // A program file compiles on the way in; a compiled file plays as-is.
    let requests = match PlayFile::from_file(path)? {
        PlayFile::Program(program) => program
            .drawings
            .into_iter()
            .map(|d| {
                let speed = d.speed.unwrap_or(program.speed);
                (DrawTarget::Instructions(d.instructions), d.offset, speed)
            })
            .collect::<Vec<_>>(),
        PlayFile::Compiled(compiled) => compiled
            .paths
            .into_iter()
            .map(|d| {
                let speed = d.speed.unwrap_or(compiled.speed);
                (DrawTarget::Path(d.path), d.offset, speed)
            })
            .collect(),
    };

    animate(requests)
}

fn demo() -> Result<()> {
    animate(demo_requests())
}

// Laid out to fit the default scale on a typical 80x24 terminal, which
// covers roughly ±57 vertical units.
fn demo_requests() -> Vec<(DrawTarget, Point, f64)> {
    vec![
        (
            DrawTarget::Instructions(line_and_square(30.0)),
            Point::new(0.0, 45.0),
            90.0,
        ),
        (
            DrawTarget::Instructions(square(50.0)),
            Point::new(-60.0, 25.0),
            90.0,
        ),
        (
            DrawTarget::Instructions(polygon(10, 25.0)),
            Point::new(25.0, 25.0),
            90.0,
        ),
    ]
}

fn animate(requests: Vec<(DrawTarget, Point, f64)>) -> Result<()> {
    let surface = TerminalSurface::new(TerminalConfig::default())?;
    let scheduler = WallClockScheduler::new(FPS);
    let mut driver = Driver::new(scheduler, surface);

    for (target, offset, speed) in requests {
        driver.draw(target, offset, speed)?;
    }

    // Keep the finished drawing on screen until dismissed; dropping the
    // surface restores the terminal.
    wait_for_quit()
}

fn wait_for_quit() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Demo shapes
// ---------------------------------------------------------------------------

fn square(size: f64) -> Vec<Instruction> {
    polygon(4, size)
}

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

fn line_and_square(size: f64) -> Vec<Instruction> {
    vec![
        Instruction::pen_down(),
        Instruction::right(90.0),
        Instruction::forward(size),
        Instruction::left(45.0),
        Instruction::group(square(size)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    // An 80x24 terminal at the default scale covers about ±57 units
    // vertically and ±100 horizontally.
    #[test]
    fn demo_drawings_fit_a_default_terminal() {
        for (target, offset, _) in demo_requests() {
            let path = target.into_path().unwrap();
            for segment in path.segments() {
                let p = segment.position();
                assert!(
                    (p.y + offset.y).abs() <= 57.0,
                    "y out of range: {}",
                    p.y + offset.y,
                );
                assert!(
                    (p.x + offset.x).abs() <= 100.0,
                    "x out of range: {}",
                    p.x + offset.x,
                );
            }
        }
    }
}
