//! SQL queries that are used in multiple places.

/// SQL query for fetching warnings, together with their player and moderator.
pub static SELECT: &str = r"
	SELECT SQL_CALC_FOUND_ROWS
	  w.id,
	  w.player_id,
	  p.username player_username,
	  w.reason,
	  w.notes,
	  m.id warned_by_id,
	  m.name warned_by_name,
	  w.created_on
	FROM
	  Warnings w
	  JOIN Players p ON p.id = w.player_id
	  LEFT JOIN Moderators m ON m.id = w.warned_by
";
