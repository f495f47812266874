//! Chat command - Interactive conversation with the completion endpoint.

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;
use tracing::info;

use inferlab_chat::{segment, ChatSession, CompletionClient, GenerationParameters};

#[derive(Args)]
pub struct ChatArgs {
    /// Endpoint base URL (overrides INFERLAB_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Model identifier (overrides INFERLAB_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// API token (overrides HF_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f64,

    /// Nucleus sampling cutoff
    #[arg(long, default_value_t = 0.9)]
    pub top_p: f64,

    /// Maximum tokens per response
    #[arg(long, default_value_t = 150)]
    pub max_tokens: u32,

    /// Frequency penalty
    #[arg(long, default_value_t = 0.0)]
    pub frequency_penalty: f64,

    /// Presence penalty
    #[arg(long, default_value_t = 0.0)]
    pub presence_penalty: f64,

    /// Fixed seed for reproducible outputs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Comma-separated stop sequences
    #[arg(long)]
    pub stop: Option<String>,

    /// Wait for the complete response instead of streaming
    #[arg(long)]
    pub no_stream: bool,

    /// Do not display the model's thinking segment
    #[arg(long)]
    pub hide_thinking: bool,
}

pub async fn execute(args: ChatArgs) -> Result<()> {
    let mut client = CompletionClient::from_env(args.token.clone())?;
    if let Some(ref base_url) = args.base_url {
        client = client.with_base_url(base_url.clone());
    }
    if let Some(ref model) = args.model {
        client = client.with_model(model.clone());
    }

    let stop = args.stop.as_deref().map(|s| {
        s.split(',')
            .map(|seq| seq.trim().to_string())
            .filter(|seq| !seq.is_empty())
            .collect::<Vec<_>>()
    });

    let params = GenerationParameters {
        temperature: args.temperature,
        top_p: args.top_p,
        max_tokens: args.max_tokens,
        frequency_penalty: args.frequency_penalty,
        presence_penalty: args.presence_penalty,
        seed: args.seed,
        stop: stop.filter(|s| !s.is_empty()),
    };

    info!(model = client.model(), "starting chat session");

    println!("Chatting with {} — /clear resets, /quit exits.", client.model());
    println!();

    let mut session = ChatSession::new();
    let stdin = std::io::stdin();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear();
                println!("(history cleared)");
                continue;
            }
            _ => {}
        }

        session.push_user(input);

        let reply = if args.no_stream || args.hide_thinking {
            // Collect the full turn before rendering so the thinking
            // segment can be filtered out.
            session.converse(&client, &params).await
        } else {
            let mut stream = session.converse_streaming(&client, &params).await;
            let mut full = String::new();
            while let Some(fragment) = stream.next().await {
                print!("{}", fragment);
                std::io::stdout().flush()?;
                full.push_str(&fragment);
            }
            println!();
            session.finish_turn(full.clone());
            full
        };

        if args.no_stream || args.hide_thinking {
            let parts = segment(&reply);
            if !parts.reasoning.is_empty() && !args.hide_thinking {
                println!("[thinking] {}", parts.reasoning);
            }
            println!("{}", parts.response);
        }
        println!();
    }

    Ok(())
}
