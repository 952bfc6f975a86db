//! Console output formatter for chat messages

use chrono::Local;
use colored::Colorize;
use deskchat_application::HistoryEntry;
use deskchat_domain::{DeliveryStatus, Message, Notice, PersonalDataKind, Sender};

/// Formats session content for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Delivery ticks: `✓` sent, `✓✓` delivered, blue `✓✓` read.
    pub fn ticks(status: DeliveryStatus) -> String {
        match status {
            DeliveryStatus::Read => status.ticks().blue().to_string(),
            DeliveryStatus::Sent | DeliveryStatus::Delivered => status.ticks().dimmed().to_string(),
        }
    }

    /// Format one message of the session log
    pub fn format_message(message: &Message) -> String {
        let time = message.timestamp.with_timezone(&Local).format("%H:%M").to_string();
        match message.sender {
            Sender::Assistant => format!(
                "{} {}\n{}",
                "Assistant".cyan().bold(),
                time.dimmed(),
                Self::indent(&message.text, "  ")
            ),
            Sender::User => format!(
                "{} {} {}\n{}",
                "You".green().bold(),
                time.dimmed(),
                Self::ticks(message.delivery_status),
                Self::indent(&message.text, "  ")
            ),
        }
    }

    /// Tick line printed when a sent message advances
    pub fn format_status(status: DeliveryStatus) -> String {
        format!("  {} {}", Self::ticks(status), status.to_string().dimmed())
    }

    pub fn format_notice(notice: &Notice) -> String {
        if notice.is_error() {
            format!("{} {}", "!".red().bold(), notice.text().red())
        } else {
            format!("{} {}", "i".green().bold(), notice.text())
        }
    }

    pub fn format_quick_replies(replies: &[&str]) -> String {
        let mut output = format!("{}\n", "Quick replies:".cyan().bold());
        for (index, reply) in replies.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", index + 1, reply));
        }
        output.push_str(&format!("{}", "Send one with /quick <number>".dimmed()));
        output
    }

    /// Format the server-side transcript
    pub fn format_history(entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return "No stored messages for this session yet.".dimmed().to_string();
        }
        let mut output = format!(
            "{}\n{}\n",
            "=== Stored transcript ===".cyan().bold(),
            "-".repeat(40)
        );
        for entry in entries {
            let who = match entry.sender {
                Sender::User => "You".green().bold(),
                Sender::Assistant => "Assistant".cyan().bold(),
            };
            output.push_str(&format!(
                "{} {}\n{}\n",
                who,
                entry
                    .timestamp
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .dimmed(),
                Self::indent(&entry.text, "  ")
            ));
        }
        output
    }

    pub fn format_personal_data(kind: PersonalDataKind, text: &str) -> String {
        let title = match kind {
            PersonalDataKind::Profile => "Your profile",
            PersonalDataKind::Fees => "Your fees",
            PersonalDataKind::Schedule => "Your schedule",
        };
        format!(
            "{}\n{}\n{}",
            title.cyan().bold(),
            "-".repeat(40),
            Self::indent(text, "  ")
        )
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
