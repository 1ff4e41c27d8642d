use bartleby_core::{table, op, Filter, Operator};

fn main() {
    // SELECT with clean filter syntax
    let (sql, values) = table("users")
        .filter(("age", op::GT, 18))        // Using op constants
        .filter(("status", "active"))       // Defaults to EQ
        .filter(("city", "LIKE", "%York%")) // Using string operators
        .order_by_desc("created_at")
        .limit(10)
        .unwrap()
        .offset(5)
        .unwrap()
        .to_sql();

    println!("SELECT SQL: {}", sql);
    println!("  values: {:?}", values);

    // Null checks take no placeholder
    let (sql, values) = table("users")
        .filter(Filter::is_null("deleted_at"))
        .filter(("verified", true))
        .to_sql();

    println!("NULL-check SQL: {}", sql);
    println!("  values: {:?}", values);

    // Aggregates replace the projection and refuse pagination
    let (sql, _) = table("orders")
        .filter(("status", "paid"))
        .select_sum("total_cents")
        .unwrap()
        .to_sql();

    println!("Aggregate SQL: {}", sql);

    // UPDATE ... RETURNING with SET placeholders numbered first
    let (sql, values) = table("users")
        .filter(("id", 123))
        .to_update_sql([("email", "newemail@example.com")]);

    println!("UPDATE SQL: {}", sql);
    println!("  values: {:?}", values);

    // DELETE switches the verb and drops the projection
    let (sql, values) = table("users")
        .delete()
        .filter(("age", op::LT, 13))
        .to_sql();

    println!("DELETE SQL: {}", sql);
    println!("  values: {:?}", values);

    // Custom operators for database-specific features
    let (sql, _) = table("documents")
        .select(("title", "content"))
        .filter(("content", Operator::custom("@@"), "search query"))
        .to_sql();

    println!("PostgreSQL FTS SQL: {}", sql);
}
