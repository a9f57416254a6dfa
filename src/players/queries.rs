//! SQL queries that are used in multiple places.

/// SQL query for fetching players.
pub static SELECT: &str = r"
	SELECT SQL_CALC_FOUND_ROWS
	  p.id,
	  p.username,
	  p.coins,
	  p.gems,
	  p.level,
	  p.playtime_seconds,
	  p.first_seen,
	  p.last_seen
	FROM
	  Players p
";
