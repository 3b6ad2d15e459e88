use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead};
use tether_chess::Engine;
use tracing::Level;

/// Interactive Tether Chess session on standard input.
#[derive(Debug, Parser)]
struct Args {
    /// Log every applied move.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    let mut engine = Engine::new_game();
    println!("{}", engine.board());
    println!("enter moves as e2-e4, O-O, e7e8=q; `moves`, `board` or `quit`");

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read from standard input")?;

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "board" => println!("{}", engine.board()),
            "moves" => {
                for m in engine.legal_moves() {
                    print!("{} ", m);
                }
                println!();
            }
            request => {
                let result = engine.play_text(request);
                println!("{}", result.message);

                if result.ok {
                    println!("{}", engine.board());
                }

                if engine.state().is_over() {
                    println!("{}", engine.state());
                    break;
                }
            }
        }
    }

    Ok(())
}
