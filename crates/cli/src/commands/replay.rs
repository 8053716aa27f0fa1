//! Replay command - drives a client through a recorded event feed.

use anyhow::{bail, Context, Result};
use lobby_core::{
    ChannelTransport, ChatClient, Config, ConversationTarget, Entry, Identity, InboundEvent,
};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

pub async fn execute(name: &str, sends: &[String], events_path: &Path) -> Result<()> {
    let config = Config::load_with_env()?;
    let (transport, mut peer) = ChannelTransport::pair();
    let mut client = ChatClient::new(config, Arc::new(transport))?;

    client.request_join(name)?;

    let file = tokio::fs::File::open(events_path)
        .await
        .with_context(|| format!("failed to open {:?}", events_path))?;
    let mut lines = BufReader::new(file).lines();

    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match InboundEvent::decode(line) {
            Ok(event) => {
                // Apply each event before reading the next, like a live feed.
                peer.deliver(event)?;
                for change in client.pump() {
                    debug!("{:?}", change);
                }
            }
            Err(e) => warn!("Skipping line {}: {}", line_no, e),
        }
    }

    for send in sends {
        let (target, body) = parse_send(send)?;
        client.send(&target, body)?;
    }

    let emitted = peer.drain_intents();
    info!("Replayed {} lines, emitted {} intents", line_no, emitted.len());

    print_report(&client);
    Ok(())
}

fn parse_send(arg: &str) -> Result<(ConversationTarget, &str)> {
    let Some((target, body)) = arg.split_once(':') else {
        bail!("send must look like `target:body`, got {:?}", arg);
    };

    let target = if target == ConversationTarget::GROUP {
        ConversationTarget::Group
    } else {
        match Identity::from_remote(target) {
            Some(identity) => ConversationTarget::Private(identity),
            None => bail!("send target is blank in {:?}", arg),
        }
    };
    Ok((target, body))
}

fn print_report(client: &ChatClient) {
    let state = client.session_state();
    let stats = client.router_stats();

    println!("Session");
    println!("=======");
    match &state.identity {
        Some(identity) => println!("Joined as:  {}", identity),
        None => println!("Joined as:  (not acknowledged)"),
    }
    println!("Connected:  {}", state.connected);
    println!("Viewing:    {}", client.active_conversation());
    println!(
        "Limits:     name >= {} chars, body <= {} bytes",
        client.config().min_identity_len,
        client.config().max_body_length
    );
    println!("Events:     {} routed, {} dropped", stats.routed, stats.dropped);
    println!();

    println!("Online ({})", client.presence_list().len());
    for peer in client.presence_list() {
        let marker = if state.identity.as_ref() == Some(peer) {
            " (You)"
        } else {
            ""
        };
        println!("  {}{}", peer, marker);
    }
    println!();

    print_conversation(
        "Group Chat",
        client.current_conversation_entries(&ConversationTarget::Group),
    );
    for counterpart in client.store().counterparts() {
        let target = ConversationTarget::Private(counterpart.clone());
        print_conversation(
            &format!("Chat with {}", counterpart),
            client.current_conversation_entries(&target),
        );
    }
}

fn print_conversation(title: &str, entries: &[Entry]) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    if entries.is_empty() {
        println!("  (empty)");
    }
    for entry in entries {
        match entry {
            Entry::Message(message) => println!(
                "  [{}] {}: {}",
                message.sent_at.format("%H:%M"),
                message.sender,
                message.body
            ),
            Entry::Notification(notification) => println!("  -- {} --", notification.text()),
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_send_targets() {
        let (target, body) = parse_send("group:hello: world").unwrap();
        assert!(target.is_group());
        assert_eq!(body, "hello: world");

        let (target, body) = parse_send("bob:hi").unwrap();
        assert_eq!(target.counterpart().map(Identity::as_str), Some("bob"));
        assert_eq!(body, "hi");
    }

    #[test]
    fn test_parse_send_rejects_malformed() {
        assert!(parse_send("no separator").is_err());
        assert!(parse_send(" :hi").is_err());
    }
}
