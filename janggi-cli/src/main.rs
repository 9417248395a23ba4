//! 韩国象棋命令行对局

mod command;
mod config;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use janggi_core::{Game, GameState};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use command::{Command, HELP};
use config::CliConfig;
use render::{render_board, RenderOptions};

fn main() -> Result<()> {
    // 日志级别来自设置，加载失败的原因等日志初始化后再输出
    let (config, load_error) = match CliConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (CliConfig::default(), Some(e)),
    };
    let first_run = CliConfig::config_path().is_some_and(|path| !path.exists());

    // 初始化日志，RUST_LOG 优先于设置文件
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_directive()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    if let Some(e) = load_error {
        warn!("{:#}，使用默认设置", e);
    }
    info!("韩国象棋启动，设置: {:?}", config);
    if first_run {
        // 首次运行写出默认设置
        if let Err(e) = config.save() {
            warn!("保存默认设置失败: {:#}", e);
        }
    }

    let options = RenderOptions {
        color: config.color,
        markers: config.markers,
    };
    let mut game = Game::new();

    println!("{}", render_board(&game, &options));
    println!("{}", HELP);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} > ", game.current_turn());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Move { from, to } => {
                let mover = game.current_turn();
                match game.try_move(from, to) {
                    Ok(mv) => {
                        println!("{}", render_board(&game, &options));
                        match mv.captured {
                            _ if mv.is_pass() => println!("{} passes", mover),
                            Some(piece) => println!("{} {}, captures {}", mover, mv, piece.marker().trim()),
                            None => println!("{} {}", mover, mv),
                        }
                    }
                    Err(e) => println!("rejected: {}", e),
                }

                if let Some(winner) = game.game_state().winner() {
                    println!("checkmate, {} wins ({})", winner, game.game_state());
                    break;
                }
                if game.is_in_check(game.current_turn()) {
                    println!("{} is in check", game.current_turn());
                }
            }
            Command::Moves(pos) => match game.piece_at(pos) {
                Some(piece) => {
                    let targets: Vec<String> = game.legal_moves(pos).iter().map(|p| p.to_string()).collect();
                    println!("{} {} at {}: {}", piece.player, piece.marker().trim(), pos, targets.join(" "));
                }
                None => println!("no piece at {}", pos),
            },
            Command::Board => println!("{}", render_board(&game, &options)),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    if game.game_state() == GameState::Unfinished {
        info!("对局未结束，退出");
    }
    Ok(())
}
