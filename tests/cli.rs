mod common;

use std::{path::PathBuf, process::Output};

use common::{listen, FakeIrcd, TIMEOUT};
use tokio::{process::Command, time::timeout};

async fn brmdoor(args: &[&str], dir: Option<&PathBuf>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_brmdoor"));
    cmd.args(args).env_remove("RUST_LOG");
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    timeout(TIMEOUT, cmd.output())
        .await
        .expect("brmdoor did not exit")
        .unwrap()
}

#[tokio::test]
async fn bad_arguments_print_usage() {
    let cases: [&[&str]; 5] = [&[], &["2"], &["yes"], &["10"], &["0", "1"]];

    for args in cases {
        let output = brmdoor(args, None).await;

        assert_eq!(output.status.code(), Some(1), "args: {args:?}");
        assert_eq!(
            String::from_utf8_lossy(&output.stdout),
            "\nUsage: brmdoor [0|1]\n\n"
        );
    }
}

/// Runs the binary against a fake server and returns everything it sent.
async fn transcript(state: &str) -> Vec<String> {
    let (listener, config) = listen().await;

    let dir = std::env::temp_dir().join(format!(
        "brmdoor-cli-{}-{}",
        std::process::id(),
        config.port
    ));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(
        dir.join("brmdoor.yaml"),
        serde_yaml::to_string(&config).unwrap(),
    )
    .await
    .unwrap();

    let server = tokio::spawn(async move {
        let mut ircd = FakeIrcd::accept(&listener).await;
        let mut seen = vec![];
        for _ in 0..2 {
            seen.push(ircd.next_line().await.unwrap());
        }
        ircd.send(":irc.test 001 brmdoor :Welcome").await;
        seen.push(ircd.next_line().await.unwrap());
        ircd.send(":brmdoor!~brmdoor@10.0.0.1 JOIN #kvak").await;
        seen.extend(ircd.drain().await);
        seen
    });

    let output = brmdoor(&[state], Some(&dir)).await;
    assert!(output.status.success(), "state {state}: {output:?}");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "join\nbrmdoor!~brmdoor@10.0.0.1\n#kvak\n[]\n"
    );

    let _ = tokio::fs::remove_dir_all(&dir).await;
    server.await.unwrap()
}

#[tokio::test]
async fn both_door_states_run_the_same_session() {
    let closed = transcript("0").await;
    let open = transcript("1").await;

    assert_eq!(
        closed,
        [
            "NICK brmdoor",
            "USER brmdoor 0 * :brmlab door",
            "JOIN #kvak",
            "QUIT :"
        ]
    );
    assert_eq!(closed, open);
}
