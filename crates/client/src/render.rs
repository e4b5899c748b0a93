//! Terminal rendering of flow outcomes.

use std::io::{self, Write};
use std::time::Duration;

use fraudshield_core::animation::CounterAnimation;
use fraudshield_core::format::{format_clock, format_inr};
use fraudshield_core::stats::Alert;
use fraudshield_core::types::{Mode, RiskScore};
use fraudshield_core::upload::UploadReport;
use fraudshield_core::verdict::{gauge_dash_offset, VerdictColor};

use crate::flow::payment::PaymentReceipt;
use crate::flow::stats::DashboardView;

/// Width of the risk gauge in characters.
pub const GAUGE_WIDTH: usize = 20;

/// Delay between animation frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const RESET: &str = "\x1b[0m";

pub fn ansi(color: VerdictColor) -> &'static str {
    match color {
        VerdictColor::Red => "\x1b[31m",
        VerdictColor::Amber => "\x1b[33m",
        VerdictColor::Green => "\x1b[32m",
    }
}

pub fn demo_tag(mode: Mode) -> &'static str {
    match mode {
        Mode::Demo => "[DEMO MODE] ",
        Mode::Live => "",
    }
}

/// Linear risk gauge, e.g. `[#####---------------]` for a score of 25.
///
/// The unfilled tail is the ring gauge's dash offset with the bar width as
/// circumference.
pub fn gauge_bar(score: RiskScore, width: usize) -> String {
    let empty = (gauge_dash_offset(width as f64, score).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(width - empty), "-".repeat(empty))
}

/// Static lines of the result overlay (everything but the score counter).
pub fn receipt_lines(receipt: &PaymentReceipt) -> Vec<String> {
    let p = &receipt.presentation;
    let color = ansi(p.color);
    vec![
        format!("{}{color}{}{RESET}", demo_tag(receipt.mode), p.headline),
        p.message.to_string(),
        format!(
            "Risk {color}{}{RESET} {}",
            gauge_bar(p.risk_score, GAUGE_WIDTH),
            p.color.hex()
        ),
        format!("Balance: {}", format_inr(receipt.balance)),
    ]
}

pub fn alert_line(alert: &Alert) -> String {
    let time = alert
        .local_time()
        .map(format_clock)
        .unwrap_or_else(|| alert.time.clone());
    format!(
        "! {} | {} • {} | {} RISK",
        alert.merchant,
        time,
        format_inr(alert.amount),
        alert.risk.to_uppercase()
    )
}

pub fn upload_line(report: &UploadReport, mode: Mode) -> String {
    format!(
        "{}Processed {} Rows. Found {} High Risks.",
        demo_tag(mode),
        report.total_processed,
        report.fraud_found
    )
}

/// Chart rows as `label  safe  fraud`.
pub fn chart_lines(view: &DashboardView) -> Vec<String> {
    let mut lines = vec![format!("{:<6} {:>5} {:>5}", "Hour", "Safe", "Fraud")];
    lines.extend(
        view.chart
            .rows()
            .map(|(label, safe, fraud)| format!("{label:<6} {safe:>5} {fraud:>5}")),
    );
    lines
}

/// Animate a counter in place on one line, then end the line.
pub async fn animate_counter<W: Write>(
    out: &mut W,
    label: &str,
    animation: CounterAnimation,
) -> io::Result<()> {
    let started = tokio::time::Instant::now();
    loop {
        let elapsed = started.elapsed();
        write!(out, "\r{label}: {}", animation.value_at(elapsed))?;
        out.flush()?;
        if animation.is_finished(elapsed) {
            break;
        }
        tokio::time::sleep(FRAME_INTERVAL).await;
    }
    writeln!(out)
}

pub async fn print_receipt<W: Write>(
    out: &mut W,
    receipt: &PaymentReceipt,
    duration: Duration,
) -> io::Result<()> {
    for line in receipt_lines(receipt) {
        writeln!(out, "{line}")?;
    }
    let score = CounterAnimation::new(0, i64::from(receipt.presentation.risk_score), duration);
    animate_counter(out, "Risk score", score).await
}

pub async fn print_dashboard<W: Write>(
    out: &mut W,
    view: &DashboardView,
    mode: Mode,
    duration: Duration,
) -> io::Result<()> {
    if mode.is_demo() {
        writeln!(out, "{}Backend unavailable, showing demo data", demo_tag(mode))?;
    }
    let total = i64::try_from(view.stats.total_transactions).unwrap_or(i64::MAX);
    let fraud = i64::try_from(view.stats.fraud_detected).unwrap_or(i64::MAX);
    animate_counter(out, "Total transactions", CounterAnimation::new(0, total, duration)).await?;
    animate_counter(out, "Fraud detected", CounterAnimation::new(0, fraud, duration)).await?;
    if let Some(volume) = view.stats.total_volume {
        writeln!(out, "Total volume: {}", format_inr(volume))?;
    }

    writeln!(out, "\nRecent alerts:")?;
    for alert in &view.stats.recent_alerts {
        writeln!(out, "{}", alert_line(alert))?;
    }

    writeln!(out, "\nTransaction volume:")?;
    for line in chart_lines(view) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use fraudshield_core::transaction::{TransactionRequest, TransactionResult, TransactionStatus};
    use fraudshield_core::verdict::present;

    use super::*;

    fn receipt(score: u8, mode: Mode) -> PaymentReceipt {
        let result = TransactionResult {
            status: TransactionStatus::from_fraud_flag(score > 70),
            is_fraud: score > 70,
            risk_score: score,
            new_balance: 125_000.0,
        };
        PaymentReceipt {
            request: TransactionRequest {
                username: "asha".into(),
                merchant: "Swiggy".into(),
                amount: 200.0,
                category: "Food".into(),
                timestamp: "2024-03-01T09:30".into(),
            },
            presentation: present(&result),
            result,
            mode,
            balance: 125_000.0,
            debited: score <= 70,
        }
    }

    #[test]
    fn gauge_bar_fills_proportionally() {
        assert_eq!(gauge_bar(0, 10), "[----------]");
        assert_eq!(gauge_bar(50, 10), "[#####-----]");
        assert_eq!(gauge_bar(100, 4), "[####]");
        assert_eq!(gauge_bar(25, 20), "[#####---------------]");
    }

    #[test]
    fn receipt_shows_verdict_and_balance() {
        let lines = receipt_lines(&receipt(85, Mode::Demo));
        assert!(lines[0].starts_with("[DEMO MODE] "));
        assert!(lines[0].contains("Transfer Blocked!"));
        assert_eq!(lines[1], "High fraud risk detected. Money not deducted.");
        assert!(lines[2].contains("#ef4444"));
        assert_eq!(lines[3], "Balance: ₹1,25,000.00");
    }

    #[test]
    fn live_receipt_has_no_demo_tag() {
        let lines = receipt_lines(&receipt(10, Mode::Live));
        assert!(!lines[0].contains("DEMO"));
        assert!(lines[0].contains("Payment Successful"));
    }

    #[test]
    fn alert_line_formats_time_and_amount() {
        let alert = Alert {
            merchant: "Overseas Gambling Site".into(),
            amount: 25_000.0,
            time: "2024-03-01T14:05:00".into(),
            risk: "High".into(),
        };
        assert_eq!(
            alert_line(&alert),
            "! Overseas Gambling Site | 2:05 PM • ₹25,000.00 | HIGH RISK"
        );
    }

    #[test]
    fn upload_line_tags_demo_mode() {
        let report = UploadReport {
            total_processed: 312,
            fraud_found: 15,
            preview: Vec::new(),
        };
        assert_eq!(
            upload_line(&report, Mode::Demo),
            "[DEMO MODE] Processed 312 Rows. Found 15 High Risks."
        );
    }

    #[tokio::test]
    async fn zero_duration_animation_prints_final_value() {
        let mut out = Vec::new();
        animate_counter(&mut out, "Risk score", CounterAnimation::new(0, 87, Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\rRisk score: 87\n");
    }
}
