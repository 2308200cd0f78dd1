use std::io::{self, BufRead, Write};

use colored::Colorize;

use grim_core::EntryId;
use grim_mechanics::{RandomDie, RoundOutcome, RoundReport};
use grim_store::{AssaultOutcome, CombatEngine, Enemy, StoreError};

use super::Store;
use crate::config::CliConfig;

const HELP: &str = "  a: assault   l: test luck   w <id|none>: weapon   f: flee   s: status
  e name <text> | e skill <n> | e stamina <+/-n>: adjust the enemy";

pub fn run(
    config: &CliConfig,
    enemy: Enemy,
    weapon: Option<u64>,
    yes: bool,
) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let mut engine =
        CombatEngine::new(&store, enemy, super::dice(config, 1)).map_err(|e| e.to_string())?;
    if let Some(id) = weapon {
        let id = EntryId(id);
        if store.character().weapon(id).is_none() {
            return Err(format!("no weapon with id {id}"));
        }
        engine
            .select_weapon(&store, Some(id))
            .map_err(|e| e.to_string())?;
    }

    println!("  {} {}", "Fight!".bold(), engine.enemy());
    println!("{HELP}\n");
    print_status(&store, &engine);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while !engine.is_over() {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => {
                println!("  The fight is abandoned.");
                break;
            }
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (cmd, rest) = input.split_once(' ').unwrap_or((input, ""));

        let result = match cmd.to_lowercase().as_str() {
            "a" | "assault" => assault(&mut store, &mut engine),
            "l" | "luck" => luck(&mut store, &mut engine),
            "w" | "weapon" => select_weapon(&store, &mut engine, rest.trim()),
            "f" | "flee" => flee(&mut engine, &mut reader, yes),
            "s" | "status" => {
                print_status(&store, &engine);
                Ok(())
            }
            "e" | "enemy" => adjust_enemy(&mut engine, rest.trim()),
            "h" | "help" | "?" => {
                println!("{HELP}");
                Ok(())
            }
            other => Err(format!("unknown command: {other} (h for help)")),
        };

        if let Err(e) = result {
            println!("  {}", e.yellow());
        }
        println!();
    }

    Ok(())
}

fn assault(store: &mut Store, engine: &mut CombatEngine<RandomDie>) -> Result<(), String> {
    match engine.assault(store).map_err(|e| e.to_string())? {
        AssaultOutcome::Round(report) => {
            print_round(engine.round(), &report);
            print_status(store, engine);
            if engine.luck_available() {
                println!("  {}", "You may test your luck (l).".dimmed());
            }
        }
        AssaultOutcome::Victory { weapon_val, .. } => {
            println!(
                "  {} {} is defeated.",
                "Victory!".green().bold(),
                engine.enemy().name
            );
            if let Some(val) = weapon_val {
                println!("  Weapon mastery is now {val:+}.");
            }
        }
        AssaultOutcome::Defeat { .. } => {
            println!("  {} Your adventure ends here.", "Defeat.".red().bold());
        }
    }
    Ok(())
}

fn luck(store: &mut Store, engine: &mut CombatEngine<RandomDie>) -> Result<(), String> {
    let luck = engine.test_luck(store).map_err(|e| e.to_string())?;
    let verdict = if luck.test.success {
        "Lucky!".green().bold()
    } else {
        "Unlucky.".red().bold()
    };
    println!(
        "  {verdict} Rolled {} against {}.",
        luck.test.roll, luck.test.current_luck
    );
    print_status(store, engine);
    Ok(())
}

fn select_weapon(
    store: &Store,
    engine: &mut CombatEngine<RandomDie>,
    arg: &str,
) -> Result<(), String> {
    let choice = match arg {
        "" => return Err("usage: w <weapon id|none>".into()),
        "none" | "-" => None,
        id => {
            let id = id
                .parse::<u64>()
                .map(EntryId)
                .map_err(|_| format!("not a weapon id: {id}"))?;
            if store.character().weapon(id).is_none() {
                return Err(format!("no weapon with id {id}"));
            }
            Some(id)
        }
    };
    engine
        .select_weapon(store, choice)
        .map_err(|e| e.to_string())?;
    print_weapon(store, engine);
    Ok(())
}

fn flee(
    engine: &mut CombatEngine<RandomDie>,
    reader: &mut impl BufRead,
    yes: bool,
) -> Result<(), String> {
    let request = engine.request_flee().map_err(|e| e.to_string())?;
    if !yes && !super::ask(reader, "Run away from the fight?")? {
        drop(request);
        println!("  {}", "You stand your ground.".dimmed());
        return Ok(());
    }
    engine.flee(request).map_err(|e| e.to_string())?;
    println!("  You fled from {}.", engine.enemy().name);
    Ok(())
}

fn adjust_enemy(engine: &mut CombatEngine<RandomDie>, args: &str) -> Result<(), String> {
    let (field, value) = args.split_once(' ').unwrap_or((args, ""));
    let value = value.trim();
    let number = || {
        value
            .parse::<i32>()
            .map_err(|_| format!("not a number: {value}"))
    };
    let result: Result<(), StoreError> = match field {
        "name" if !value.is_empty() => engine.rename_enemy(value),
        "skill" => engine.set_enemy_skill(number()?),
        "stamina" => engine.adjust_enemy_stamina(number()?).map(|_| ()),
        _ => return Err("usage: e name <text> | e skill <n> | e stamina <+/-n>".into()),
    };
    result.map_err(|e| e.to_string())?;
    println!("  {}", engine.enemy());
    Ok(())
}

fn print_round(round: u32, report: &RoundReport) {
    let outcome = match report.outcome {
        RoundOutcome::Player => report.outcome.to_string().green(),
        RoundOutcome::Enemy => report.outcome.to_string().red(),
        RoundOutcome::Draw => report.outcome.to_string().normal(),
    };
    println!(
        "  Round {round}: you {} ({}) vs enemy {} ({}): {outcome}",
        report.player_total, report.player_roll, report.enemy_total, report.enemy_roll
    );
}

fn print_status(store: &Store, engine: &CombatEngine<RandomDie>) {
    let enemy = engine.enemy();
    let me = store.character();
    println!(
        "  You: stamina {}  skill {}  luck {}   |   {}: stamina {}  skill {}",
        me.stamina, me.skill.cur, me.luck.cur, enemy.name, enemy.stamina, enemy.skill
    );
    print_weapon(store, engine);
}

fn print_weapon(store: &Store, engine: &CombatEngine<RandomDie>) {
    match engine
        .selected_weapon()
        .and_then(|id| store.character().weapon(id))
    {
        Some(weapon) => println!("  Wielding {weapon}"),
        None => println!("  Fighting bare-handed"),
    }
}
