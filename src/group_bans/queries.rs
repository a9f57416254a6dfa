//! SQL queries that are used in multiple places.

/// SQL query for fetching group bans, together with their moderator.
pub static SELECT: &str = r"
	SELECT SQL_CALC_FOUND_ROWS
	  g.id,
	  g.group_id,
	  g.group_name,
	  g.reason,
	  m.id banned_by_id,
	  m.name banned_by_name,
	  g.created_on,
	  g.is_active
	FROM
	  GroupBans g
	  LEFT JOIN Moderators m ON m.id = g.banned_by
";
