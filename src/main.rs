//! Cross-fade demo.
//!
//! Loads `segue.toml` (plus `SEGUE_*` overrides), then cross-fades between
//! two in-memory pages and back, sampling their opacity while it runs.
//! Pass `--cancel-after <ms>` to cancel the first transition part-way.
//! Logs at `info` by default; run with `RUST_LOG=debug` to see the engine too.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use segue_anim::{CancellationToken, FrameClock, Visual, VisualElement};
use segue_config::SegueConfig;
use segue_transition::{CrossFade, PageTransition};
use tracing::info;

fn parse_cancel_after() -> Result<Option<Duration>> {
    let mut args = std::env::args().skip(1);
    let mut cancel_after = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--cancel-after" => {
                let value = args.next().context("--cancel-after needs a value in ms")?;
                let ms: u64 = value
                    .parse()
                    .with_context(|| format!("invalid --cancel-after value: {}", value))?;
                cancel_after = Some(Duration::from_millis(ms));
            }
            other => bail!("unknown argument: {}", other),
        }
    }
    Ok(cancel_after)
}

fn report(label: &str, pages: [&VisualElement; 2]) {
    for page in pages {
        info!(
            step = label,
            page = page.name(),
            opacity = page.opacity(),
            visible = page.is_visible(),
            "page state"
        );
    }
}

async fn sample(pages: [&VisualElement; 2], every: Duration, until: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < until {
        tokio::time::sleep(every).await;
        elapsed += every;
        report(&format!("t+{}ms", elapsed.as_millis()), pages);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let cancel_after = parse_cancel_after()?;

    let config = SegueConfig::load();
    let engine = FrameClock::with_frame_rate(config.engine.frame_rate)
        .context("invalid engine configuration")?;
    let fade = CrossFade::from_config(engine, &config.transition);
    info!(
        duration_ms = fade.duration().as_millis() as u64,
        fill_mode = ?fade.fill_mode(),
        fade_in = ?fade.fade_in_easing(),
        fade_out = ?fade.fade_out_easing(),
        "cross-fade configured"
    );

    let home = VisualElement::new("home");
    let details = VisualElement::new("details").with_visible(false).with_opacity(0.0);
    report("initial", [&home, &details]);

    let token = CancellationToken::new();
    let trigger = token.clone();
    let canceller = async move {
        if let Some(after) = cancel_after {
            tokio::time::sleep(after).await;
            info!(after_ms = after.as_millis() as u64, "cancelling transition");
            trigger.cancel();
        }
    };
    let every = fade.duration() / 4;
    let sampler = async {
        if !every.is_zero() {
            sample([&home, &details], every, fade.duration()).await;
        }
    };

    let (outcome, (), ()) = tokio::join!(
        fade.start(Some(&home), Some(&details), true, &token),
        canceller,
        sampler,
    );
    outcome.context("forward transition failed")?;
    report("forward", [&home, &details]);

    if token.is_cancelled() {
        info!("forward transition was cancelled; skipping the way back");
        return Ok(());
    }

    fade.start(Some(&details), Some(&home), false, &CancellationToken::new())
        .await
        .context("backward transition failed")?;
    report("backward", [&home, &details]);

    Ok(())
}
