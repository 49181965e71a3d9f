use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use wordbot::{
    config::{BotConf, DEFAULT_CONFIG},
    directory::StaticDirectory,
    lang::{load_prompts, Strings},
    plugins::wordcount::{JsonFileStorage, LedgerStore},
    Outgoing, WordBot,
};

// console front end: each stdin line is `<user-id> <message>`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let conf_path = std::env::var("WORDBOT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG.to_string());
    let conf = BotConf::from_file(&conf_path).with_context(|| format!("loading {conf_path}"))?;

    let strings = Strings::load(&conf.lang_dir, &conf.language).context("loading language file")?;
    let prompts = load_prompts(&conf.prompts_path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "no writing prompts available");
        Vec::new()
    });

    let store = LedgerStore::open(JsonFileStorage::new(&conf.data_path)).await;
    let directory = StaticDirectory::new(conf.names.clone());
    let bot = WordBot::new(conf, strings, prompts, store, directory)?;

    tracing::info!("booting...");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let Some((author, content)) = line.trim().split_once(' ') else {
            continue;
        };

        let out = match bot.on_message(author, content.trim(), bot.now()).await {
            Some(Outgoing::Reply(content)) => format!("@{author} {content}\n"),
            Some(Outgoing::Channel(content)) => format!("{content}\n"),
            None => continue,
        };
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
