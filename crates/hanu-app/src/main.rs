mod config;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use hanu::display_value;
use hanu::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting Hanu shell");
    tracing::info!("Agent backend: {}", config.agent.base_url);

    let agent = Arc::new(HttpAgentClient::with_base_url(&config.agent.base_url)?);

    tracing::info!("Connecting to MongoDB");
    let persist = PersistClient::connect(&config.mongodb_uri, &config.mongodb.database).await?;
    tracing::info!("MongoDB connected");

    let storage = if config.storage.bucket.is_empty() {
        None
    } else {
        Some(S3ObjectStore::new(
            config.storage.bucket.clone(),
            config.storage.region.clone(),
        )?)
    };

    let auth = Arc::new(StaticAuthProvider::signed_out());
    let mut shell = Shell::new(
        auth.clone(),
        agent,
        Arc::new(persist.threads().clone()),
        Arc::new(persist.resources().clone()),
        AdminImpersonation::from_list(&config.admin.users),
    );

    run(&mut shell, auth, storage.as_ref()).await
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(
    shell: &mut Shell,
    auth: Arc<StaticAuthProvider>,
    storage: Option<&S3ObjectStore>,
) -> Result<()> {
    println!("Hanu shell. Type `help` for commands.");
    print_messages(shell);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(shell).await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "help" => print_help(),
            "quit" | "exit" => break,

            "login" => match auth.sign_in(rest, "").await {
                Ok(user) => {
                    println!("signed in as {}", user.id);
                    shell.refresh_threads().await;
                    shell.refresh_resources().await;
                    print_threads(shell);
                }
                Err(e) => println!("sign-in failed: {}", e),
            },
            "logout" => {
                auth.sign_out().await?;
                shell.new_chat();
                println!("signed out");
            }

            "threads" => {
                shell.refresh_threads().await;
                print_threads(shell);
            }
            "open" => match pick_thread(shell, rest) {
                Some(thread_id) => {
                    shell.open_thread(&thread_id).await;
                    print_messages(shell);
                    print_tasks(shell);
                }
                None => println!("no such thread"),
            },
            "new" => {
                shell.new_chat();
                print_messages(shell);
            }
            "send" => {
                match shell.send(rest).await {
                    Ok(()) => print_messages(shell),
                    Err(e) => println!("send failed: {}", e),
                }
            }
            "rename" => {
                shell.rename_thread(rest).await;
                println!("title: {}", shell.title());
            }

            "tasks" => print_tasks(shell),
            "status" => match parse_status(rest) {
                Some((task_id, status)) => {
                    let result = shell
                        .task_editor()
                        .and_then(|board| board.set_status(task_id, status));
                    report(result);
                }
                None => println!("usage: status <task_id> <processing|completed>"),
            },
            "media" => match rest.splitn(4, ' ').collect::<Vec<_>>().as_slice() {
                [task_id, result_id, kind, url] => match parse_media_kind(kind) {
                    Some(kind) => {
                        let result = shell
                            .task_editor()
                            .and_then(|board| board.add_media(task_id, result_id, kind, url));
                        report(result);
                    }
                    None => println!("media kind must be images|videos|documents"),
                },
                _ => println!("usage: media <task_id> <result_id> <kind> <url>"),
            },
            "upload" => match storage {
                Some(store) => {
                    match rest.splitn(4, ' ').collect::<Vec<_>>().as_slice() {
                        [task_id, result_id, kind, path] => match parse_media_kind(kind) {
                            Some(kind) => {
                                let bytes = tokio::fs::read(path).await?;
                                let outcome = shell
                                    .attach_task_upload(
                                        store,
                                        task_id,
                                        result_id,
                                        kind,
                                        path,
                                        bytes,
                                        "application/octet-stream",
                                    )
                                    .await;
                                match outcome {
                                    Ok(url) => println!("uploaded: {}", url),
                                    Err(e) => println!("error: {}", e),
                                }
                            }
                            None => println!("media kind must be images|videos|documents"),
                        },
                        _ => println!("usage: upload <task_id> <result_id> <kind> <path>"),
                    }
                }
                None => println!("no object storage configured"),
            },
            "save" => report(shell.save_tasks().await),

            "resources" => {
                shell.refresh_resources().await;
                print_resources(shell);
            }
            "addres" => match rest.split_once(' ') {
                Some((title, url)) => match shell.add_resource(title, url).await {
                    Ok(resource) => println!("saved {:?} resource {}", resource.kind, resource.id),
                    Err(e) => println!("error: {}", e),
                },
                None => println!("usage: addres <title> <url>"),
            },
            "insert" => match shell.insert_resource(rest).await {
                Ok(snippet) => println!("insert into composer: {}", snippet),
                Err(e) => println!("error: {}", e),
            },

            "users" => match shell.user_activity().await {
                Ok(activity) => {
                    for entry in activity {
                        println!(
                            "{}  threads={}  last active {}",
                            entry.user_id, entry.thread_count, entry.last_active
                        );
                    }
                }
                Err(e) => println!("error: {}", e),
            },
            "as" => match shell.impersonate(rest) {
                Ok(()) => {
                    shell.refresh_threads().await;
                    print_threads(shell);
                }
                Err(e) => println!("error: {}", e),
            },
            "back" => {
                shell.stop_impersonating();
                println!("impersonation cleared");
            }

            _ => println!("unknown command, try `help`"),
        }
    }

    Ok(())
}

async fn prompt(shell: &Shell) -> Result<()> {
    let who = shell
        .current_user()
        .map(|u| u.id)
        .unwrap_or_else(|| "signed out".to_string());
    let acting = match shell.impersonation_target() {
        Some(target) => format!(" (as {})", target),
        None => String::new(),
    };
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{}{}> ", who, acting).as_bytes())
        .await?;
    stdout.flush().await?;
    Ok(())
}

fn report(result: std::result::Result<(), SessionError>) {
    match result {
        Ok(()) => println!("ok"),
        Err(e) => println!("error: {}", e),
    }
}

fn pick_thread(shell: &Shell, arg: &str) -> Option<String> {
    if let Ok(index) = arg.parse::<usize>() {
        return shell.threads().get(index).map(|t| t.id.clone());
    }
    shell
        .threads()
        .iter()
        .find(|t| t.id == arg)
        .map(|t| t.id.clone())
}

fn parse_status(rest: &str) -> Option<(&str, TaskStatus)> {
    let (task_id, status) = rest.split_once(' ')?;
    match status.trim() {
        "processing" => Some((task_id, TaskStatus::Processing)),
        "completed" => Some((task_id, TaskStatus::Completed)),
        _ => None,
    }
}

fn parse_media_kind(kind: &str) -> Option<MediaKind> {
    match kind {
        "images" => Some(MediaKind::Images),
        "videos" => Some(MediaKind::Videos),
        "documents" => Some(MediaKind::Documents),
        _ => None,
    }
}

fn print_threads(shell: &Shell) {
    if let Some(error) = shell.list_error() {
        println!("! {}", error);
        return;
    }
    if shell.threads().is_empty() {
        println!("No threads yet");
        return;
    }
    for (index, thread) in shell.threads().iter().enumerate() {
        println!("[{}] {}  ({})", index, thread.title, thread.date.format("%Y-%m-%d %H:%M"));
    }
}

fn print_messages(shell: &Shell) {
    println!("── {} ──", shell.title());
    for message in shell.messages() {
        let who = match message.role {
            MessageRole::Assistant => "assistant",
            MessageRole::User => "you",
        };
        println!("{:>9}: {}", who, message.content);
    }
    if let Some(error) = shell.session_error() {
        println!("! {}", error);
    }
}

fn print_tasks(shell: &Shell) {
    if shell.tasks().is_empty() {
        println!("(no tasks)");
        return;
    }
    for (id, task) in shell.tasks() {
        let status = match task.status {
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
        };
        println!("{}  [{}]  {}", id, status, task.task_type);
        for (key, value) in &task.args {
            println!("    {}: {}", key, display_value(value));
        }
        for result in &task.results {
            println!("    - {} ({})", result.title, result.id);
            if !result.body.is_empty() {
                println!("      {}", result.body);
            }
            if !result.cta.is_empty() {
                println!("      open: {}", result.cta);
            }
            for kind in MediaKind::ALL {
                let urls = result.media(kind);
                if !urls.is_empty() {
                    println!("      {} ({}): {}", kind.label(), urls.len(), urls.join(", "));
                }
            }
        }
    }
    if shell.tasks_dirty() {
        println!("(unsaved task edits — `save` to push)");
    }
}

fn print_resources(shell: &Shell) {
    if shell.resources().is_empty() {
        println!("(no resources)");
        return;
    }
    for resource in shell.resources() {
        println!("{}  {:?}  {}  {}", resource.id, resource.kind, resource.title, resource.url);
    }
}

fn print_help() {
    println!(
        "\
login <email> / logout
threads | open <n> | new | send <text> | rename <title>
tasks | status <task> <processing|completed> | media <task> <result> <kind> <url>
upload <task> <result> <kind> <path> | save
resources | addres <title> <url> | insert <resource_id>
users | as <user_id> | back
quit"
    );
}
