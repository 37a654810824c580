// src/bin/client.rs - terminal front end for the posts feed
use std::io::{self, BufRead, Write};

use log::{error, info};
use reqwest::Client;
use tokio::sync::watch;

use shareapp::client::{
    Composer, ComposerError, DeleteOutcome, FeedSnapshot, FeedStore, HttpPostsApi, ImageFile,
    ImageKitUploader, Prompter, TerminalPrompter,
};
use shareapp::config::ClientConfig;

const HELP: &str = "commands: list | reload | post | attach <path> | detach | delete <n> | help | quit";

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        Err(e) => {
            error!("failed to read stdin: {}", e);
            None
        }
    }
}

fn render(feed: &FeedSnapshot) {
    println!("--- Recent Posts ({}) ---", feed.len());
    if feed.is_empty() {
        println!("(no posts yet)");
    }
    for (i, post) in feed.iter().enumerate() {
        println!("[{}] {}", i + 1, post.title);
        if let Some(url) = &post.image_url {
            println!("    image: {url}");
        }
        println!("    {}", post.content);
    }
}

/// Redraw only when the store published a new snapshot.
fn redraw_if_changed(rx: &mut watch::Receiver<FeedSnapshot>) {
    if rx.has_changed().unwrap_or(false) {
        render(&rx.borrow_and_update());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = ClientConfig::from_env()?;
    let http_client = Client::builder().user_agent("shareapp-client/0.1").build()?;
    let api = HttpPostsApi::new(http_client.clone(), &config.api_base_url);

    let uploader = config.imagekit.as_ref().map(|ik| {
        if let Some(endpoint) = &ik.url_endpoint {
            info!("ImageKit URL endpoint: {}", endpoint);
        }
        ImageKitUploader::new(http_client.clone(), api.clone(), &ik.public_key, &ik.upload_url)
    });

    let prompter = TerminalPrompter;
    let store = FeedStore::new(api, prompter);
    let mut feed_rx = store.subscribe();
    let mut composer = Composer::new();

    info!("using backend at {}", config.api_base_url);
    // a failed initial load leaves the feed empty
    let _ = store.load().await;
    render(&feed_rx.borrow_and_update());
    println!("{HELP}");

    while let Some(line) = read_line("> ") {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            "list" => render(&store.snapshot()),
            "reload" => {
                let _ = store.load().await;
            }
            "attach" => {
                let Some(uploader) = uploader.as_ref() else {
                    prompter.alert("Image uploads are disabled (IMAGEKIT_PUBLIC_KEY not set)");
                    continue;
                };
                if arg.is_empty() {
                    println!("usage: attach <path>");
                    continue;
                }
                match ImageFile::from_path(arg).await {
                    Ok(file) => {
                        println!("Uploading {}...", file.file_name);
                        if composer.upload(&file, uploader, &prompter).await {
                            println!("Attached {}", composer.image_name().unwrap_or_default());
                        }
                    }
                    Err(e) => prompter.alert(&format!("Image upload failed: {e}")),
                }
            }
            "detach" => {
                composer.remove_image();
                println!("Image removed");
            }
            "post" => {
                if let Some(name) = composer.image_name() {
                    println!("(attached image: {name})");
                }
                let Some(title) = read_line("Title: ") else { break };
                let Some(content) = read_line("Content: ") else { break };
                composer.title = title;
                composer.content = content;
                match composer.submit(&store).await {
                    Ok(post) => info!("published {}", post.id),
                    // the store has already alerted
                    Err(ComposerError::Create(_)) => {}
                    Err(e) => prompter.alert(&e.to_string()),
                }
            }
            "delete" => {
                let snapshot = store.snapshot();
                let target = arg
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|idx| snapshot.get(idx));
                match target {
                    Some(post) => {
                        if let Ok(DeleteOutcome::Declined) = store.delete(post.id).await {
                            println!("Kept \"{}\"", post.title);
                        }
                    }
                    None => println!("usage: delete <n> (1..={})", snapshot.len()),
                }
            }
            other => println!("unknown command: {other}\n{HELP}"),
        }

        redraw_if_changed(&mut feed_rx);
    }

    Ok(())
}
