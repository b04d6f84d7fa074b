fn main() {
    println!("Run `cargo test -p sshdrop-e2e` to execute the end-to-end pipeline tests.");
}

// End-to-end pipeline tests against real child processes.
//
// A `FakeHost` executor routes the three PuTTY invocations (trust probe,
// home query, copy) onto `/bin/sh` scripts, so the session, orchestrator,
// resolvers, and the real streaming runner all execute together with
// genuine subprocess I/O. Unix-only, like the shell they depend on.
#[cfg(all(test, unix))]
mod tests {
    use std::future::Future;
    use std::path::Path;
    use std::pin::Pin;
    use std::sync::Arc;

    use sshdrop_runner::{run, run_streaming, CommandOutput, CommandSpec, RunnerError};
    use sshdrop_session::{SessionEvent, TransferSession};
    use sshdrop_transfer::{
        CommandExecutor, Endpoint, LineSink, Secret, TransferRequest,
    };
    use tokio_util::sync::CancellationToken;

    /// Stands in for a reachable remote host by rewriting each PuTTY
    /// invocation into a `/bin/sh -c` script.
    struct FakeHost {
        probe_script: String,
        home_script: String,
        copy_script: String,
    }

    impl FakeHost {
        fn sh(script: &str) -> CommandSpec {
            CommandSpec::new("/bin/sh").arg("-c").arg(script)
        }

        fn script_for(&self, spec: &CommandSpec) -> CommandSpec {
            let is_home_query = spec
                .argv()
                .iter()
                .any(|arg| arg.contains("cd ~ && pwd"));
            if spec.program() == "pscp" {
                Self::sh(&self.copy_script)
            } else if is_home_query {
                Self::sh(&self.home_script)
            } else {
                Self::sh(&self.probe_script)
            }
        }
    }

    impl CommandExecutor for FakeHost {
        fn run(
            &self,
            spec: CommandSpec,
        ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, RunnerError>> + Send + '_>>
        {
            let spec = self.script_for(&spec);
            Box::pin(async move { run(&spec).await })
        }

        fn run_streaming(
            &self,
            spec: CommandSpec,
            cancel: CancellationToken,
            on_line: LineSink,
        ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, RunnerError>> + Send + '_>>
        {
            let spec = self.script_for(&spec);
            Box::pin(async move { run_streaming(&spec, cancel, on_line).await })
        }
    }

    const PROBE: &str =
        "echo 'ssh-ed25519 255 SHA256:e2efingerprint=' >&2; exit 1";
    const HOME: &str = "echo /home/trex";

    fn request(dir: &Path) -> TransferRequest {
        let source = dir.join("payload.sh");
        std::fs::write(&source, b"#!/bin/sh\n").unwrap();
        TransferRequest {
            endpoint: Endpoint::new("trex", "192.168.31.89", Secret::new("123")),
            local_path: source,
            remote_destination: "~/tempTest".into(),
        }
    }

    fn five_line_copy() -> String {
        let mut script = String::new();
        for p in [20, 40, 60, 80, 100] {
            script.push_str(&format!(
                "echo 'payload.sh | 4 kB | 4.0 kB/s | ETA: 00:00:00 | {p}%'; "
            ));
        }
        script.push_str("exit 0");
        script
    }

    #[tokio::test]
    async fn full_pipeline_happy_path() {
        let dir = tempfile::tempdir().unwrap();
        let host = Arc::new(FakeHost {
            probe_script: PROBE.into(),
            home_script: HOME.into(),
            copy_script: five_line_copy(),
        });

        let mut session = TransferSession::spawn(host, request(dir.path()));
        let mut rx = session.take_events().unwrap();

        let mut percents = Vec::new();
        let mut terminal = None;
        while let Some(event) = rx.recv().await {
            match event {
                SessionEvent::Progress(p) => {
                    assert!(terminal.is_none(), "progress after terminal event");
                    percents.push(p.percent);
                }
                other => {
                    assert!(terminal.is_none(), "second terminal event");
                    terminal = Some(other);
                }
            }
        }
        session.join().await;

        assert_eq!(
            percents,
            [Some(20), Some(40), Some(60), Some(80), Some(100)]
        );
        match terminal {
            Some(SessionEvent::Finished(result)) => {
                assert_eq!(result.exit_code, 0);
                assert_eq!(result.stdout.lines().count(), 5);
            }
            other => panic!("expected finished, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn copy_exit_one_reaches_terminal_handler() {
        let dir = tempfile::tempdir().unwrap();
        let host = Arc::new(FakeHost {
            probe_script: PROBE.into(),
            home_script: HOME.into(),
            copy_script: "echo 'pscp: connection refused' >&2; exit 1".into(),
        });

        let mut session = TransferSession::spawn(host, request(dir.path()));
        let mut rx = session.take_events().unwrap();

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(events.len(), 1);
        match &events[0] {
            SessionEvent::Finished(result) => {
                assert_eq!(result.exit_code, 1);
                assert!(result.stdout.is_empty());
                assert!(result.stderr.contains("connection refused"));
            }
            other => panic!("expected finished, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancellation_terminates_a_hung_copy() {
        let dir = tempfile::tempdir().unwrap();
        let host = Arc::new(FakeHost {
            probe_script: PROBE.into(),
            home_script: HOME.into(),
            copy_script:
                "echo 'payload.sh | 4 kB | 4.0 kB/s | ETA: 00:00:09 | 10%'; sleep 300"
                    .into(),
        });

        let mut session = TransferSession::spawn(host, request(dir.path()));
        let cancel = session.cancel_token();
        let mut rx = session.take_events().unwrap();

        let mut saw_progress = false;
        let mut terminal = None;
        while let Some(event) = rx.recv().await {
            match event {
                SessionEvent::Progress(p) => {
                    assert_eq!(p.percent, Some(10));
                    saw_progress = true;
                    cancel.cancel();
                }
                other => terminal = Some(other),
            }
        }
        session.join().await;

        assert!(saw_progress);
        match terminal {
            Some(SessionEvent::Finished(result)) => assert_ne!(result.exit_code, 0),
            other => panic!("expected finished, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn degraded_trust_still_delivers() {
        // Probe output carries no fingerprint; the copy proceeds unpinned.
        let dir = tempfile::tempdir().unwrap();
        let host = Arc::new(FakeHost {
            probe_script: "echo 'Access denied' >&2; exit 1".into(),
            home_script: HOME.into(),
            copy_script: "exit 0".into(),
        });

        let mut session = TransferSession::spawn(host, request(dir.path()));
        let mut rx = session.take_events().unwrap();

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], SessionEvent::Finished(r) if r.success()));
    }
}
