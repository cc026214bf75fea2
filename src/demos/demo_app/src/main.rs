use std::io::{self, Read, Stdout, Write};

use anyhow::Context;
use heapless::Deque;
use log::{info, warn};

use ucmd_config::*;
use ucmd_core::{
    CommandContext, CommandEntry, CommandFn, Config, Dispatcher, Error, MatchState,
    TerminatorMatcher, Transport,
};

/// Stdin/stdout standing in for a serial link, plus the counters the commands report.
struct Stdio<W = Stdout> {
    rx: Deque<u8, RX_QUEUE_LEN>,
    out: W,
    handled: u32,
    write_errors: u32,
}

impl Stdio {
    fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> Stdio<W> {
    fn with_writer(out: W) -> Self {
        Self {
            rx: Deque::new(),
            out,
            handled: 0,
            write_errors: 0,
        }
    }

    /// Queues as much of `bytes` as fits and returns the unqueued rest.
    fn push<'b>(&mut self, bytes: &'b [u8]) -> &'b [u8] {
        for (i, &b) in bytes.iter().enumerate() {
            if self.rx.push_back(b).is_err() {
                return &bytes[i..];
            }
        }
        &[]
    }
}

impl<W: Write> Transport for Stdio<W> {
    fn bytes_available(&mut self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> u8 {
        self.rx.pop_front().unwrap_or(0)
    }

    fn write_byte(&mut self, byte: u8) {
        if let Err(e) = self.out.write_all(&[byte]) {
            self.write_errors += 1;
            warn!("stdout write failed: {e}");
        }
    }
}

type Demo = Dispatcher<Stdio, LINE_BUFFER_LEN, MAX_COMMANDS>;

/// Command table: name, handler (`None` for inert commands), help text.
const COMMANDS: &[(&str, Option<CommandFn<Stdio>>, &str)] = &[
    ("PING", Some(ping), "reply PONG"),
    ("ECHO", Some(echo), "echo the rest of the line"),
    ("SUM", Some(sum), "add integer arguments"),
    ("STATS", Some(stats), "commands handled and failed writes"),
    ("HELP", Some(help), "list commands"),
    ("RESET", None, "accepted, does nothing"),
];

fn ping(ctx: &mut CommandContext<'_, Stdio>) {
    ctx.transport_mut().handled += 1;
    ctx.write_line(b"PONG");
}

fn echo(ctx: &mut CommandContext<'_, Stdio>) {
    ctx.transport_mut().handled += 1;
    let rest = ctx.remainder().unwrap_or_default();
    ctx.write_line(rest);
}

fn sum(ctx: &mut CommandContext<'_, Stdio>) {
    ctx.transport_mut().handled += 1;
    let mut total: i64 = 0;
    while let Some(token) = ctx.next_token() {
        let parsed = core::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<i64>().ok());
        match parsed {
            Some(n) => total = total.saturating_add(n),
            None => {
                ctx.write(b"ERR not a number: ");
                ctx.write_line(token);
                return;
            }
        }
    }
    ctx.send("SUM", total.to_string().as_bytes());
}

fn stats(ctx: &mut CommandContext<'_, Stdio>) {
    ctx.transport_mut().handled += 1;
    let Stdio {
        handled,
        write_errors,
        ..
    } = *ctx.transport_mut();
    let stats = format!("handled={handled} write_errors={write_errors}");
    ctx.send("STATS", stats.as_bytes());
}

fn help(ctx: &mut CommandContext<'_, Stdio>) {
    ctx.transport_mut().handled += 1;
    let width = COMMANDS
        .iter()
        .map(|(name, _, _)| name.len())
        .max()
        .unwrap_or(0);
    for (name, _, about) in COMMANDS {
        ctx.write_line(format!("{name:>width$} : {about}").as_bytes());
    }
}

fn unknown(ctx: &mut CommandContext<'_, Stdio>, name: &[u8]) {
    ctx.write(b"ERR unknown command: ");
    ctx.write_line(name);
}

fn build() -> anyhow::Result<Demo> {
    let config = Config::new()
        .with_terminator(TERMINATOR)
        .with_delimiters(DELIMITERS);
    let mut demo =
        Demo::new(Stdio::new(), config).context("invalid dispatcher configuration")?;
    for &(name, handler, _) in COMMANDS {
        let entry = match handler {
            Some(handler) => CommandEntry::new(name, handler),
            None => CommandEntry::inert(name),
        };
        demo.add_command(entry)
            .with_context(|| format!("registering {name}"))?;
    }
    demo.set_default_handler(unknown);
    Ok(demo)
}

/// Runs the dispatcher over everything queued.
///
/// After an overlong line the rest of it is skipped up to the next
/// terminator, so its tail is not mistaken for a command.
fn drain(demo: &mut Demo, resync: &mut TerminatorMatcher<'static>, discarding: &mut bool) {
    loop {
        while *discarding && demo.transport_mut().bytes_available() > 0 {
            let byte = demo.transport_mut().read_byte();
            if resync.advance(byte) == MatchState::Matched {
                *discarding = false;
            }
        }
        if *discarding {
            return;
        }

        match demo.read_data() {
            Ok(()) => return,
            Err(Error::BufferFull) => {
                warn!("line longer than {} bytes, discarding", LINE_BUFFER_LEN - 1);
                demo.clear_buffer();
                demo.write(b"ERR line too long");
                demo.write(TERMINATOR);
                resync.reset();
                *discarding = true;
            }
            Err(e) => {
                warn!("dispatch failed: {e}");
                demo.clear_buffer();
                return;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let mut demo = build()?;
    info!(
        "{} commands registered: {}",
        demo.registry().len(),
        demo.registry().names().collect::<Vec<_>>().join(", ")
    );

    let mut resync = TerminatorMatcher::new(TERMINATOR);
    let mut discarding = false;
    let mut stdin = io::stdin().lock();
    let mut chunk = [0u8; READ_CHUNK_LEN];

    loop {
        let n = stdin.read(&mut chunk).context("reading stdin")?;
        if n == 0 {
            info!("input closed");
            break;
        }

        let mut rest = &chunk[..n];
        while !rest.is_empty() {
            rest = demo.transport_mut().push(rest);
            drain(&mut demo, &mut resync, &mut discarding);
        }
        demo.transport_mut().out.flush().context("flushing stdout")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_writes_are_counted() {
        let mut io = Stdio::with_writer(BrokenPipe);
        io.write_all(b"PONG");
        assert_eq!(io.write_errors, 4);
    }

    #[test]
    fn successful_writes_reach_the_writer() {
        let mut io = Stdio::with_writer(Vec::new());
        io.write_all(b"PONG\n");
        assert_eq!(io.out, b"PONG\n");
        assert_eq!(io.write_errors, 0);
    }

    #[test]
    fn push_returns_what_does_not_fit() {
        let mut io = Stdio::with_writer(Vec::new());
        let bytes = [b'a'; RX_QUEUE_LEN + 3];
        assert_eq!(io.push(&bytes).len(), 3);
        assert_eq!(io.bytes_available(), RX_QUEUE_LEN);
    }
}
