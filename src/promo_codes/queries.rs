//! SQL queries that are used in multiple places.

/// SQL query for fetching promo codes, together with their creator.
pub static SELECT: &str = r"
	SELECT SQL_CALC_FOUND_ROWS
	  c.id,
	  c.code,
	  c.reward,
	  c.uses,
	  c.max_uses,
	  c.is_active,
	  m.id created_by_id,
	  m.name created_by_name,
	  c.created_on
	FROM
	  PromoCodes c
	  LEFT JOIN Moderators m ON m.id = c.created_by
";
