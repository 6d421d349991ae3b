use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use demineur_core::{
    BoardGenerator, Difficulty, Game, GameConfig, GameError, Pos, RandomBoardGenerator, solve,
};

#[derive(Debug, Parser)]
#[command(name = "demineur", version, about = "Console minesweeper with a rule-based bot")]
struct Cli {
    /// Number of board rows, prompted for when omitted
    #[arg(long)]
    rows: Option<usize>,

    /// Number of board columns, prompted for when omitted
    #[arg(long)]
    cols: Option<usize>,

    /// Difficulty name; anything but EASY, MEDIUM or HARD plays HARD
    #[arg(long)]
    difficulty: Option<String>,

    /// Mine placement seed, drawn randomly when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Let the solver play instead of prompting for moves
    #[arg(long)]
    bot: bool,

    /// First cell the bot reveals, as `row,col`
    #[arg(long, default_value = "0,0", value_parser = parse_pos)]
    start: Pos,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.verbosity);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let rows = match cli.rows {
        Some(rows) => rows,
        None => ask_number(&mut input, "Enter number of rows for the board: ")?,
    };
    let cols = match cli.cols {
        Some(cols) => cols,
        None => ask_number(&mut input, "Enter number of columns for the board: ")?,
    };
    let difficulty = match &cli.difficulty {
        Some(name) => Difficulty::from_input(name),
        None => {
            let name = ask_line(&mut input, "Choose a difficulty from [EASY, MEDIUM, HARD]: ")?;
            Difficulty::from_input(name.trim())
        }
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("playing {difficulty:?} with seed {seed}");

    let config =
        GameConfig::with_difficulty(rows, cols, difficulty).context("cannot set up the board")?;
    let board = RandomBoardGenerator::new(seed)
        .generate(config)
        .context("board generation failed")?;
    let mut game = Game::new(board);

    if cli.bot {
        run_bot(&mut game, cli.start)
    } else {
        run_interactive(&mut game, &mut input)
    }
}

fn init_logging(verbosity: &Verbosity<InfoLevel>) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbosity.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run_interactive(game: &mut Game, input: &mut impl BufRead) -> Result<()> {
    while !game.is_finished() {
        println!("Current Board: ({} mines remaining)", game.mines_left());
        print!("{}", game.player());

        let decision = ask_line(input, "Choose 0 to reveal or 1 to flag: ")?;
        let row = ask_number(input, "Which row? ")?;
        let col = ask_number(input, "Which column? ")?;

        let result = if decision.trim() == "0" {
            game.reveal((row, col)).map(|_| ())
        } else {
            game.flag((row, col)).map(|_| ())
        };

        match result {
            Ok(()) => {}
            Err(GameError::Lost) => {
                report_loss(game);
                return Ok(());
            }
            Err(err) => println!("{err}"),
        }
    }

    report_win(game);
    Ok(())
}

fn run_bot(game: &mut Game, start: Pos) -> Result<()> {
    println!("Current Board: ({} mines remaining)", game.mines_left());
    print!("{}", game.player());
    println!("Bot starts at row {}, column {}.", start.0, start.1);

    let outcome = game.reveal(start).and_then(|_| solve(game));
    match outcome {
        Ok(run) => {
            println!(
                "Solved in {} sweeps ({} revealed, {} flagged).",
                run.sweeps, run.revealed, run.flagged
            );
            report_win(game);
        }
        Err(GameError::Lost) => report_loss(game),
        Err(GameError::NoProgress) => {
            println!("The bot ran out of safe deductions.");
            print!("{}", game.player());
        }
        Err(err) => return Err(err).context("bot play failed"),
    }
    Ok(())
}

fn report_win(game: &Game) {
    println!("Congratulations! You won!");
    println!("Final Board:");
    print!("{}", game.player());
}

fn report_loss(game: &Game) {
    println!("{}", GameError::Lost);
    if let Some((row, col)) = game.triggered_mine() {
        println!("The mine was at row {row}, column {col}.");
    }
}

fn ask_line(input: &mut impl BufRead, prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("unexpected end of input");
    }
    Ok(line)
}

fn ask_number(input: &mut impl BufRead, prompt: &str) -> Result<usize> {
    loop {
        let line = ask_line(input, prompt)?;
        match line.trim().parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn parse_pos(value: &str) -> Result<Pos, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got `{value}`"))?;
    let row = row.trim().parse().map_err(|_| format!("bad row in `{value}`"))?;
    let col = col.trim().parse().map_err(|_| format!("bad column in `{value}`"))?;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_arguments_are_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn positions_parse_from_comma_pairs() {
        assert_eq!(parse_pos("0,0").unwrap(), (0, 0));
        assert_eq!(parse_pos("3, 7").unwrap(), (3, 7));
        assert!(parse_pos("3").is_err());
        assert!(parse_pos("a,b").is_err());
        assert!(parse_pos("1,").is_err());
    }

    #[test]
    fn numbers_are_asked_again_until_valid() {
        let mut input = io::Cursor::new(b"not a number\n12\n".to_vec());

        assert_eq!(ask_number(&mut input, "? ").unwrap(), 12);
    }

    #[test]
    fn closed_input_surfaces_an_error() {
        let mut input = io::Cursor::new(Vec::new());

        assert!(ask_line(&mut input, "? ").is_err());
    }
}
