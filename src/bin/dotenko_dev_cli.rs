// src/bin/dotenko_dev_cli.rs

use dotenko_engine::domain::hand::{Declaration, DotenkoKind, RoundSummary};
use dotenko_engine::domain::settings::GameSettings;
use dotenko_engine::domain::{Card, MatchId, PlayerId};
use dotenko_engine::engine::{
    evaluate_declaration, validate_play, ManagerError, MatchManager, PlayerAction, RoundEngine,
    RoundHistory, RoundPhase, RoundStatus,
};
use dotenko_engine::infra::{DeterministicRng, IdGenerator};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Предел действий на раунд, чтобы ботам не крутиться вечно.
const MAX_ACTIONS_PER_ROUND: usize = 2_000;

fn main() {
    init_tracing();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    println!("dotenko_dev_cli: партия ботов, seed={}", seed);

    let ids = IdGenerator::new();
    let mut rng = DeterministicRng::from_seed(seed);
    let mut manager = MatchManager::new();

    let settings = GameSettings {
        rounds: 5,
        stack_rate_up: Some(3),
        ..GameSettings::default()
    };
    let players: Vec<PlayerId> = (0..3).map(|_| ids.next_player_id()).collect();
    let match_id = ids.next_match_id();

    if let Err(err) = manager.create_match(match_id, settings, players) {
        println!("[CLI] Не удалось создать партию: {}", err);
        return;
    }

    while manager.get(match_id).is_some_and(|m| !m.is_finished()) {
        let round_id = ids.next_round_id();
        if let Err(err) = manager.start_next_round(match_id, &mut rng, round_id) {
            println!("[CLI] start_next_round: {}", err);
            break;
        }
        println!();
        println!("================ ROUND {} =================", round_id);
        if let Some(engine) = manager.round(match_id) {
            print_round_state(engine);
        }

        match play_round(&mut manager, match_id, &mut rng) {
            Ok(true) => {}
            Ok(false) => {
                println!("[CLI] Раунд не завершился за {} действий, стоп.", MAX_ACTIONS_PER_ROUND);
                break;
            }
            Err(err) => {
                println!("[CLI] Ошибка в раунде: {}", err);
                break;
            }
        }
    }

    println!();
    println!("================ STANDINGS =================");
    match manager.standings(match_id) {
        Ok(rows) => {
            for (pid, score) in rows {
                println!("  Player {:>2}: {}", pid, score);
            }
        }
        Err(err) => println!("[CLI] standings: {}", err),
    }
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}

/// Один раунд ботами. `Ok(true)` – раунд разрешился.
fn play_round(
    manager: &mut MatchManager,
    match_id: MatchId,
    rng: &mut DeterministicRng,
) -> Result<bool, ManagerError> {
    for _ in 0..MAX_ACTIONS_PER_ROUND {
        let Some(engine) = manager.round(match_id) else {
            return Ok(false);
        };

        let action = match engine.phase {
            RoundPhase::Resolved => return Ok(true),
            RoundPhase::AwaitingDeclarationWindow => match find_declaration(engine) {
                Some(action) => action,
                None => {
                    manager.close_declaration_window(match_id)?;
                    continue;
                }
            },
            RoundPhase::AwaitingPlay => {
                let pid = engine.current_player();
                match find_play(engine, pid) {
                    Some(cards) => PlayerAction::play(pid, cards),
                    None => {
                        // Тянем карту; если после неё хода нет – пас.
                        let drawn = manager.apply_action(match_id, PlayerAction::draw(pid), rng)?;
                        if let RoundStatus::Finished(summary, history) = drawn {
                            report_round(&summary, &history);
                            return Ok(true);
                        }
                        let can_play = manager
                            .round(match_id)
                            .and_then(|e| find_play(e, pid))
                            .is_some();
                        if can_play {
                            continue;
                        }
                        PlayerAction::pass(pid)
                    }
                }
            }
        };

        match manager.apply_action(match_id, action, rng)? {
            RoundStatus::Finished(summary, history) => {
                report_round(&summary, &history);
                return Ok(true);
            }
            RoundStatus::DeclarationFailed(outcome) => {
                println!(
                    "[CLI] Объявление игрока {} не прошло: {} против {}",
                    outcome.declared_by, outcome.hand_value, outcome.table_total
                );
            }
            RoundStatus::Ongoing(_) | RoundStatus::Passed => {}
        }
    }
    Ok(false)
}

fn report_round(summary: &RoundSummary, history: &RoundHistory) {
    let Some(outcome) = &summary.outcome else {
        println!(
            "[CLI] Колода кончилась, раунд без победителя (проходов колоды: {}, {} событий)",
            summary.deck_cycles,
            history.len()
        );
        return;
    };
    println!(
        "[CLI] {:?} от игрока {}: поле {}, курс {}, x{}{} ({} событий)",
        outcome.kind,
        outcome.declared_by,
        outcome.table_total,
        summary.rate,
        outcome.multiplier,
        if outcome.inverted { ", инверсия" } else { "" },
        history.len()
    );
    for (pid, delta) in &outcome.point_delta {
        println!("        Player {:>2}: {}", pid, delta);
    }
}

/// Кто из игроков может объявить прямо сейчас.
fn find_declaration(engine: &RoundEngine) -> Option<PlayerAction> {
    let opening = engine.field.played_by.len() == engine.players.len();
    for &pid in &engine.players {
        let hand = engine.hand(pid)?;
        let mut kinds = vec![DotenkoKind::Dotenko];
        if opening {
            kinds.push(DotenkoKind::Shotenko);
        }
        // На свои карты объявлять нельзя.
        if engine.field.played_by.iter().all(|&p| p == pid) {
            continue;
        }
        for kind in kinds {
            let declaration = Declaration {
                player_id: pid,
                kind,
                target: None,
            };
            let valid = evaluate_declaration(
                &engine.field,
                hand,
                &declaration,
                &engine.modifiers,
                engine.rate,
            )
            .is_ok_and(|o| o.valid);
            if valid {
                return Some(PlayerAction::declare(pid, kind));
            }
        }
    }
    None
}

/// Первая подходящая выкладка: одиночные карты, потом пары.
fn find_play(engine: &RoundEngine, pid: PlayerId) -> Option<Vec<Card>> {
    let cards = &engine.hand(pid)?.cards;
    let singles = cards.iter().map(|&c| vec![c]);
    let pairs = cards
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| cards[i + 1..].iter().map(move |&b| vec![a, b]));
    singles
        .chain(pairs)
        .find(|set| validate_play(&engine.field, set).is_ok())
}

fn print_round_state(engine: &RoundEngine) {
    let field: Vec<String> = engine.field.cards.iter().map(|c| c.to_string()).collect();
    println!(
        "[CLI] Поле: [{}], значение {:?}, курс {}",
        field.join(" "),
        engine.field.current_total(),
        engine.rate
    );
    for pid in &engine.players {
        if let Some(hand) = engine.hand(*pid) {
            let cards: Vec<String> = hand.cards.iter().map(|c| c.to_string()).collect();
            println!("        Player {:>2}: {}", pid, cards.join(" "));
        }
    }
}
