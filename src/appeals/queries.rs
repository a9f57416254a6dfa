//! SQL queries that are used in multiple places.

/// SQL query for fetching appeals, together with their player and reviewer.
pub static SELECT: &str = r"
	SELECT SQL_CALC_FOUND_ROWS
	  a.id,
	  a.ban_id,
	  a.player_id,
	  p.username player_username,
	  a.status,
	  a.what_happened,
	  a.why_unban,
	  a.additional_info,
	  a.created_on,
	  m.id reviewed_by_id,
	  m.name reviewed_by_name,
	  a.reviewed_on
	FROM
	  BanAppeals a
	  JOIN Players p ON p.id = a.player_id
	  LEFT JOIN Moderators m ON m.id = a.reviewed_by
";
