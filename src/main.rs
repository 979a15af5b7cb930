use anyhow::Result;
use chess_opponent::{
    Difficulty, Game, GameStatus, Settings, ShakmatyOracle, Square, logging, util::parse_move_input,
};
use futures::{Stream, StreamExt, stream};
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  e2e4, e7e8q     play a move (promotion defaults to queen)
  moves <square>  list legal destinations for your piece
  level <easy|medium|hard>
  board           show the board
  quit";

#[tokio::main]
async fn main() -> Result<()> {
    // start with "CHESS_LOG=debug ./chess-opponent 2>> chess-opponent.log" to keep the search lines
    let settings = Settings::load()?;
    logging::init(settings.level_filter()?)?;
    debug!("Loaded settings: {settings:?}");

    let mut game = Game::standard(&settings);
    info!(
        "New game. You play {}, computer plays {} on {}.",
        game.human_side(),
        game.computer_side(),
        game.difficulty()
    );
    println!("{HELP}\n");
    println!("{}\n", game.board());

    let mut input = Box::pin(stdin_lines());
    loop {
        match game.status() {
            GameStatus::Ongoing => {}
            GameStatus::Checkmate { winner } => {
                println!("Checkmate! {winner} wins!");
                break;
            }
            GameStatus::Draw => {
                println!("Draw!");
                break;
            }
        }

        if game.is_computer_turn() {
            println!("Computer is thinking...");
            if let Some(reply) = game.play_computer().await? {
                println!("Computer played {reply}\n\n{}\n", game.board());
            }
            continue;
        }

        let Some(line) = input.next().await else {
            break;
        };
        let line = line?;
        if !handle_command(&mut game, line.trim()) {
            break;
        }
    }

    Ok(())
}

/// Returns `false` when the player wants to leave.
fn handle_command(game: &mut Game<ShakmatyOracle>, line: &str) -> bool {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (None, _) => {}
        (Some("quit" | "exit"), _) => return false,
        (Some("help"), _) => println!("{HELP}"),
        (Some("board"), _) => println!("{}\n", game.board()),
        (Some("level"), Some(level)) => match level.parse::<Difficulty>() {
            Ok(difficulty) => game.set_difficulty(difficulty),
            Err(e) => println!("{e}"),
        },
        (Some("moves"), Some(square)) => match square.parse::<Square>() {
            Ok(from) => {
                let targets = game.targets_from(from);
                if targets.is_empty() {
                    println!("No legal moves from {from}");
                } else {
                    let names = targets.iter().map(Square::to_string).collect::<Vec<_>>();
                    println!("{from}: {}", names.join(" "));
                }
            }
            Err(e) => println!("{e}"),
        },
        (Some(text), _) => match parse_move_input(text) {
            Ok(input) => match game.play_human(input.from, input.to, input.promotion) {
                Ok(_) => println!("\n{}\n", game.board()),
                Err(e) => println!("{e}"),
            },
            Err(e) => {
                debug!("could not read move {text:?}: {e}");
                println!("Unrecognised input, type \"help\" for commands");
            }
        },
    }
    true
}

fn stdin_lines() -> impl Stream<Item = std::io::Result<String>> {
    stream::unfold(
        BufReader::new(tokio::io::stdin()).lines(),
        |mut lines| async move {
            match lines.next_line().await {
                Ok(Some(line)) => Some((Ok(line), lines)),
                Ok(None) => None,
                Err(e) => Some((Err(e), lines)),
            }
        },
    )
}
