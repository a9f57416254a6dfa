//! Discord webhook notifications.
//!
//! Every moderation action (ban, warning, unban) is logged to a Discord channel via webhooks.
//! Which webhook URL to use is determined by the kind of action; the URLs are read from the
//! environment on startup, and actions without a configured URL are simply not logged.
//!
//! Delivery is fire-and-forget. A failed webhook must never fail the moderation action itself, so
//! requests are spawned onto the runtime and failures are only logged.

use chrono::Utc;
use serde_json::{json, Value as JsonValue};

use crate::roblox::RobloxID;
use crate::State;

/// The color used for all log embeds (`#B17F37`).
const EMBED_COLOR: u32 = 11632439;

/// A moderation action to be logged to Discord.
#[derive(Debug)]
pub struct ModLog<'a> {
	/// The kind of action.
	pub kind: LogKind,

	/// The affected player's Roblox ID.
	pub roblox_id: RobloxID,

	/// The affected player's username.
	pub username: &'a str,

	/// The reason for the action.
	pub reason: &'a str,

	/// Optional moderator notes.
	pub notes: Option<&'a str>,

	/// The name of the moderator who performed the action.
	pub moderator_name: &'a str,
}

/// The different kinds of moderation actions that get logged to Discord.
#[derive(Debug)]
pub enum LogKind {
	/// A player was banned.
	Ban {
		/// Human readable ban duration, e.g. `"7d"`. `None` means permanent.
		duration: Option<String>,
	},

	/// A player was warned.
	Warning,

	/// A ban was reverted.
	Unban,
}

impl ModLog<'_> {
	/// Sends this log to the appropriate webhook, if one is configured.
	///
	/// The actual HTTP request runs in a background task; errors are logged but not propagated.
	pub fn dispatch(self, state: &'static State) {
		let Some(webhook_url) = (match self.kind {
			LogKind::Ban { .. } => state.config.ban_webhook_url.as_ref(),
			LogKind::Warning => state.config.warning_webhook_url.as_ref(),
			LogKind::Unban => state.config.unban_webhook_url.as_ref(),
		}) else {
			return;
		};

		let webhook_url = webhook_url.clone();
		let payload = json!({ "embeds": [self.embed()] });

		tokio::spawn(async move {
			let response = state
				.http_client
				.post(webhook_url)
				.json(&payload)
				.send()
				.await;

			match response {
				Ok(response) if response.status().is_success() => {}
				Ok(response) => {
					let status = response.status();
					let body = response.text().await.ok();

					tracing::warn!(%status, ?body, "discord webhook rejected payload");
				}
				Err(error) => {
					tracing::warn!(%error, "failed to send discord webhook");
				}
			}
		});
	}

	/// Builds the embed object for this log.
	fn embed(&self) -> JsonValue {
		let date = Utc::now().format("%b %-d, %Y, %-I:%M %p");
		let profile_url = self.roblox_id.profile_url();
		let notes = self.notes.unwrap_or("No additional notes");
		let description = format!(
			"**Username:** [{username}:{roblox_id}]({profile_url})\n\
			 **Date:** {date}\n\
			 **Notes:** {notes}\n\n\
			 **Reason:**\n```{reason}```",
			username = self.username,
			roblox_id = self.roblox_id,
			reason = self.reason,
		);

		let (title, footer) = match self.kind {
			LogKind::Ban { ref duration } => {
				let duration = duration.as_deref().unwrap_or("Permanent");

				(
					"Ban Log",
					format!("Duration: {duration} | Banned by {}", self.moderator_name),
				)
			}
			LogKind::Warning => (
				"Warning Log",
				format!("Warning issued by {}", self.moderator_name),
			),
			LogKind::Unban => ("Unban Log", format!("Unbanned by {}", self.moderator_name)),
		};

		json!({
			"title": title,
			"description": description,
			"color": EMBED_COLOR,
			"footer": { "text": footer },
		})
	}
}

#[cfg(test)]
mod tests {
	use super::{LogKind, ModLog};
	use crate::roblox::RobloxID;

	#[test]
	fn ban_embed_has_the_expected_shape() {
		let log = ModLog {
			kind: LogKind::Ban {
				duration: Some(String::from("7d")),
			},
			roblox_id: RobloxID(156),
			username: "builderman",
			reason: "exploiting",
			notes: None,
			moderator_name: "AlyxAdmin",
		};

		let embed = log.embed();

		assert_eq!(embed["title"], "Ban Log");
		assert_eq!(embed["color"], super::EMBED_COLOR);
		assert_eq!(embed["footer"]["text"], "Duration: 7d | Banned by AlyxAdmin");

		let description = embed["description"].as_str().expect("description is a string");

		assert!(description.contains("[builderman:156](https://www.roblox.com/users/156/profile)"));
		assert!(description.contains("**Notes:** No additional notes"));
		assert!(description.contains("```exploiting```"));
	}

	#[test]
	fn permanent_bans_say_so_in_the_footer() {
		let log = ModLog {
			kind: LogKind::Ban { duration: None },
			roblox_id: RobloxID(1),
			username: "noob",
			reason: "spam",
			notes: None,
			moderator_name: "AlyxAdmin",
		};

		let embed = log.embed();

		assert_eq!(
			embed["footer"]["text"],
			"Duration: Permanent | Banned by AlyxAdmin"
		);
	}

	#[test]
	fn unban_embed_uses_the_unban_footer() {
		let log = ModLog {
			kind: LogKind::Unban,
			roblox_id: RobloxID(1),
			username: "noob",
			reason: "appeal approved",
			notes: Some("second chance"),
			moderator_name: "AlyxAdmin",
		};

		let embed = log.embed();

		assert_eq!(embed["title"], "Unban Log");
		assert_eq!(embed["footer"]["text"], "Unbanned by AlyxAdmin");
	}
}
