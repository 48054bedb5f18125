use std::process::ExitCode;

use chrono::Utc;
use log::warn;

use wpp_console::api::models::{Conversation, User};
use wpp_console::app::Console;
use wpp_console::pages::{
    AnalyticsPage, ConversationsPage, DashboardPage, SettingsPage, SettingsTab, TimeRange, UsersPage,
};
use wpp_console::storage::{Cache, Cached};
use wpp_console::utils::block_on;
use wpp_console::view::StatusFilter;

const USAGE: &str = "usage: wpp-console <command> [options]

commands:
  login <email> <password>
  logout
  me
  health
  dashboard
  users [--search TERM] [--status all|active|inactive]
  conversations [--search TERM] [--status all|active|pending|resolved] [--open ID] [--refresh]
  analytics [--range 7d|30d|90d]
  settings [--tab ID] [--set GROUP.FIELD=VALUE]... [--save]";

#[derive(Debug, Default, PartialEq)]
struct ListArgs {
    search: String,
    status: StatusFilter,
}

#[derive(Debug, PartialEq)]
enum Command {
    Login { email: String, password: String },
    Logout,
    Me,
    Health,
    Dashboard,
    Users(ListArgs),
    Conversations { list: ListArgs, open: Option<String>, refresh: bool },
    Analytics { range: TimeRange },
    Settings { tab: SettingsTab, edits: Vec<(String, String, String)>, save: bool },
}

fn take_value(rest: &mut std::slice::Iter<'_, String>, flag: &str) -> Result<String, String> {
    rest.next().cloned().ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_edit(raw: &str) -> Result<(String, String, String), String> {
    let (path, value) = raw.split_once('=').ok_or_else(|| format!("expected GROUP.FIELD=VALUE, got {}", raw))?;
    let (group, field) = path.split_once('.').ok_or_else(|| format!("expected GROUP.FIELD, got {}", path))?;
    Ok((group.to_string(), field.to_string(), value.to_string()))
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let (cmd, rest) = args.split_first().ok_or("missing command")?;
    let mut rest = rest.iter();
    let mut list = ListArgs::default();
    let mut open = None;
    let mut refresh = false;
    let mut range = TimeRange::default();
    let mut tab = SettingsTab::default();
    let mut edits = Vec::new();
    let mut save = false;
    let mut positional = Vec::new();

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--search" => list.search = take_value(&mut rest, arg)?,
            "--status" => list.status = StatusFilter::parse(&take_value(&mut rest, arg)?),
            "--open" => open = Some(take_value(&mut rest, arg)?),
            "--refresh" => refresh = true,
            "--range" => range = take_value(&mut rest, arg)?.parse::<TimeRange>()?,
            "--tab" => tab = take_value(&mut rest, arg)?.parse::<SettingsTab>().map_err(|e| e.to_string())?,
            "--set" => edits.push(parse_edit(&take_value(&mut rest, arg)?)?),
            "--save" => save = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            _ => positional.push(arg.clone()),
        }
    }

    let command = match cmd.as_str() {
        "login" => match positional.as_slice() {
            [email, password] => Command::Login { email: email.clone(), password: password.clone() },
            _ => return Err("login needs <email> <password>".into()),
        },
        "logout" => Command::Logout,
        "me" => Command::Me,
        "health" => Command::Health,
        "dashboard" => Command::Dashboard,
        "users" => Command::Users(list),
        "conversations" => Command::Conversations { list, open, refresh },
        "analytics" => Command::Analytics { range },
        "settings" => Command::Settings { tab, edits, save },
        other => return Err(format!("unknown command {}", other)),
    };
    Ok(command)
}

fn cached<R: Cached>() -> Vec<R> {
    match Cache::open_default().and_then(|cache| cache.load::<R>(None)) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("cache unavailable: {}", e);
            Vec::new()
        }
    }
}

fn remember<R: Cached>(records: &[R]) {
    if let Err(e) = Cache::open_default().and_then(|mut cache| cache.store(records)) {
        warn!("could not update cache: {}", e);
    }
}

fn print_error(error: Option<&str>) {
    if let Some(msg) = error {
        println!("! {}", msg);
    }
}

fn run(command: Command, console: &mut Console) -> Result<(), String> {
    let client = console.client.clone();
    let now = Utc::now();
    match command {
        Command::Login { email, password } => {
            let resp = block_on(client.login(&email, &password)).map_err(|e| e.to_string())?;
            console.persist_session().map_err(|e| e.to_string())?;
            let name = resp.user.get("name").and_then(|v| v.as_str()).unwrap_or(&email);
            println!("Logged in as {}", name);
        }
        Command::Logout => {
            let result = block_on(client.logout());
            console.persist_session().map_err(|e| e.to_string())?;
            result.map_err(|e| e.to_string())?;
            println!("Logged out");
        }
        Command::Me => {
            let me = block_on(client.current_user()).map_err(|e| e.to_string())?;
            println!("{} <{}>{}", me.name, me.email, if me.is_admin { " (admin)" } else { "" });
        }
        Command::Health => {
            let health = block_on(client.get_health_check()).map_err(|e| e.to_string())?;
            println!("{}", serde_json::to_string_pretty(&health).unwrap_or_default());
        }
        Command::Dashboard => {
            let mut page = DashboardPage::new();
            block_on(page.refresh(&client));
            print_error(page.error());
            for card in page.cards() {
                println!("{:<20} {}", card.title, card.value);
            }
            println!();
            for row in page.recent(now) {
                println!("{:<16} [{}] {} ({})", row.name, row.badge.label, row.last_message, row.time);
            }
        }
        Command::Users(list) => {
            let seed: Vec<User> = cached();
            let mut page = if seed.is_empty() { UsersPage::new() } else { UsersPage::with_users(seed) };
            if block_on(page.load(&client)) {
                remember(page.users());
            }
            page.search = list.search;
            page.status = list.status;
            print_error(page.error());
            for card in page.cards() {
                println!("{:<20} {}", card.title, card.value);
            }
            println!();
            for row in page.rows(now) {
                println!(
                    "{:<16} {:<16} {:<22} {:<8} desde {} | {} | {} conversas",
                    row.name, row.phone, row.email, row.badge.label, row.joined, row.last_seen, row.conversations
                );
            }
        }
        Command::Conversations { list, open, refresh } => {
            let seed: Vec<Conversation> = cached();
            let mut page = if seed.is_empty() {
                ConversationsPage::new()
            } else {
                ConversationsPage::with_conversations(seed)
            };
            if refresh && block_on(page.load(&client)) {
                remember(page.conversations());
            }
            page.search = list.search;
            page.status = list.status;
            if let Some(id) = open {
                if !page.select(&id) {
                    println!("! conversa {} não encontrada", id);
                }
            }
            print_error(page.error());
            for row in page.rows(now) {
                let marker = if row.selected { ">" } else { " " };
                println!(
                    "{} {:<16} [{}] {} ({}, {}, {} não lidas) {}",
                    marker, row.name, row.badge.label, row.last_message, row.time, row.messages, row.unread,
                    row.tags.join(", ")
                );
            }
            if let Some(selected) = page.selected() {
                println!("\n== {} ({})", selected.name, selected.phone);
                for msg in page.thread_rows(now) {
                    let who = if msg.from_customer { "cliente" } else { "bot" };
                    println!("[{}] {}: {}", msg.time, who, msg.content);
                }
            }
        }
        Command::Analytics { range } => {
            let mut page = AnalyticsPage::new();
            page.range = range;
            block_on(page.refresh(&client));
            print_error(page.error());
            println!("{}", range.label());
            for card in page.cards() {
                println!("{:<26} {} ({})", card.title, card.value, card.trend.unwrap_or(""));
            }
            println!();
            for point in page.daily_series() {
                println!("{:<12} {}", point.name, point.messages);
            }
            if let Some(peak) = page.peak_hour() {
                println!("pico: {} ({} mensagens)", peak.hour, peak.messages);
            }
            for (name, share) in page.conversation_type_shares() {
                println!("{:<14} {:.0}%", name, share);
            }
        }
        Command::Settings { tab, edits, save } => {
            let mut page = SettingsPage::new();
            page.tab = tab;
            for (group, field, value) in edits {
                page.set_from_str(&group, &field, &value).map_err(|e| e.to_string())?;
            }
            if save {
                block_on(page.save(&client));
                print_error(page.error());
                if page.is_saved() {
                    println!("Configurações salvas");
                }
            }
            println!("== {}", page.tab);
            let token = client.session().token();
            for (field, value) in page.fields(token.as_deref()) {
                println!("{:<22} {}", field, value);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    wpp_console::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let mut console = Console::bootstrap();
    match run(command, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
