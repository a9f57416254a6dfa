//! SQL queries that are used in multiple places.

/// SQL query for fetching bans, together with their player, moderator, and unban (if any).
pub static SELECT: &str = r"
	SELECT SQL_CALC_FOUND_ROWS
	  b.id,
	  b.player_id,
	  p.username player_username,
	  b.reason,
	  b.notes,
	  m1.id banned_by_id,
	  m1.name banned_by_name,
	  b.created_on,
	  b.expires_on,
	  b.appealable_on,
	  b.is_active,
	  ub.id unban_id,
	  ub.reason unban_reason,
	  m2.id unbanned_by_id,
	  m2.name unbanned_by_name,
	  ub.created_on unban_created_on
	FROM
	  Bans b
	  JOIN Players p ON p.id = b.player_id
	  LEFT JOIN Moderators m1 ON m1.id = b.banned_by
	  LEFT JOIN Unbans ub ON ub.ban_id = b.id
	  LEFT JOIN Moderators m2 ON m2.id = ub.unbanned_by
";
