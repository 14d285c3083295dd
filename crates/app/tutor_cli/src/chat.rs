//! Terminal chat loop.
//!
//! Replies are printed raw as they are revealed; the HTML rendering kept in
//! the session is meant for richer frontends.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tutor_client::client::ChatEvent;
use tutor_client::{ChatSession, MessageStatus, TutorClient};

use crate::Result;

const PROMPT: &str = "> ";
const QUIT: &str = "/quit";

/// Reads questions from stdin until EOF, `/quit` or Ctrl-C at the prompt.
pub async fn interactive(client: &TutorClient) -> Result<()> {
    let mut session = ChatSession::new();
    let mut out = io::stdout();

    if let Some(greeting) = session.messages().first() {
        writeln!(out, "{}", greeting.text())?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            writeln!(out)?;
            break;
        };
        if line.trim() == QUIT {
            break;
        }

        session.set_input(line);
        exchange(client, &mut session, &mut out).await?;
    }

    Ok(())
}

/// Asks one question and prints the reply, or its JSON record with `json`.
pub async fn ask_once(client: &TutorClient, question: String, json: bool) -> Result<()> {
    let mut session = ChatSession::empty();
    session.set_input(question);
    if !json {
        return exchange(client, &mut session, &mut io::stdout()).await;
    }

    exchange(client, &mut session, &mut io::sink()).await?;
    if let Some(reply) = session.messages().last() {
        println!("{}", serde_json::to_string(reply)?);
    }
    Ok(())
}

/// Runs one exchange; Ctrl-C while it runs stops the reply.
async fn exchange<W: Write>(
    client: &TutorClient,
    session: &mut ChatSession,
    out: &mut W,
) -> Result<()> {
    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stopper.cancel();
        }
    });

    let mut written = Ok(());
    let sent = client
        .ask(session, &cancel, |event| {
            if written.is_ok() {
                written = render(out, &event);
            }
        })
        .await;
    watcher.abort();

    if !sent {
        log::warn!("empty question, nothing sent");
    }
    written?;
    Ok(())
}

fn render<W: Write>(out: &mut W, event: &ChatEvent<'_>) -> io::Result<()> {
    match event {
        ChatEvent::Revealed { delta, .. } => {
            write!(out, "{delta}")?;
            out.flush()
        }
        ChatEvent::Finished { message } => match message.status() {
            MessageStatus::Errored => writeln!(out, "{}", message.text()),
            MessageStatus::Stopped => writeln!(out, " [stopped]"),
            _ => writeln!(out),
        },
    }
}

#[cfg(test)]
mod tests {
    use tutor_client::Message;

    use super::*;

    fn rendered(event: ChatEvent<'_>) -> String {
        let mut out = Vec::new();
        render(&mut out, &event).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn revealed_prints_raw_delta() {
        let mut message = Message::placeholder();
        message.append("**");
        assert_eq!(
            rendered(ChatEvent::Revealed {
                message: &message,
                delta: "**"
            }),
            "**"
        );
    }

    #[test]
    fn errored_prints_error_line() {
        let mut message = Message::placeholder();
        message.fail("Error: HTTP 500: Internal Server Error. Please check your backend connection.");
        assert_eq!(
            rendered(ChatEvent::Finished { message: &message }),
            "Error: HTTP 500: Internal Server Error. Please check your backend connection.\n"
        );
    }

    #[test]
    fn stopped_is_marked() {
        let mut message = Message::placeholder();
        message.append("partial");
        message.stop();
        assert_eq!(
            rendered(ChatEvent::Finished { message: &message }),
            " [stopped]\n"
        );
    }

    #[test]
    fn complete_ends_the_line() {
        let mut message = Message::placeholder();
        message.append("done");
        message.complete();
        assert_eq!(rendered(ChatEvent::Finished { message: &message }), "\n");
    }
}
