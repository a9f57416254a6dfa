//! This module contains the [`Permissions`] type, which abstracts over this idea. It has various
//! constants defined for the existing roles, and can be serialized / deserialized by serde, as
//! well as be inserted into the database.

crate::bitflags! {
	/// Bitfield for holding permission information.
	///
	/// Every permission is represented as a specific bit in a 32-bit integer.
	/// If the bit is 1, it means the moderator has this permission.
	pub Permissions as u32 {
		BANS = { 1 << 0, "bans" };
		WARNINGS = { 1 << 4, "warnings" };
		PLAYERS = { 1 << 8, "players" };
		CODES = { 1 << 12, "codes" };
		ADMIN = { 1 << 31, "admin" };
	}

	iter: PermissionsIter
}

#[cfg(test)]
mod tests {
	use super::Permissions;

	#[test]
	fn contains_works() {
		let perms = Permissions::BANS | Permissions::WARNINGS;

		assert!(perms.contains(Permissions::BANS));
		assert!(perms.contains(Permissions::WARNINGS));
		assert!(!perms.contains(Permissions::ADMIN));
	}

	#[test]
	fn parses_from_name() {
		assert_eq!("bans".parse::<Permissions>().ok(), Some(Permissions::BANS));
		assert_eq!("codes".parse::<Permissions>().ok(), Some(Permissions::CODES));
		assert!("not-a-permission".parse::<Permissions>().is_err());
	}
}
