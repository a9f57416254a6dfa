//! SQL queries that are used in multiple places.

/// SQL query for fetching moderators.
pub static SELECT: &str = r"
	SELECT SQL_CALC_FOUND_ROWS
	  m.id,
	  m.name,
	  m.permissions,
	  m.created_on
	FROM
	  Moderators m
";
