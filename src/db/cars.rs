use sqlx::{mysql::MySqlArguments, query::Query, MySql, MySqlConnection};

use crate::{
    error::AppResult,
    models::{Car, CarChanges, FieldValue, NewCar},
};

type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// Binds a client value untouched; a missing value binds as `NULL`
fn bind_field<'q>(query: MySqlQuery<'q>, value: Option<&'q FieldValue>) -> MySqlQuery<'q> {
    match value {
        None | Some(FieldValue::Null) => query.bind(None::<String>),
        Some(FieldValue::Bool(b)) => query.bind(*b),
        Some(FieldValue::Integer(i)) => query.bind(*i),
        Some(FieldValue::Float(f)) => query.bind(*f),
        Some(FieldValue::Text(s)) => query.bind(s.as_str()),
    }
}

/// All rows, soft-deleted ones included, in whatever order MySQL returns them
pub async fn list_all(conn: &mut MySqlConnection) -> AppResult<Vec<Car>> {
    let cars = sqlx::query_as::<_, Car>("SELECT * FROM Cars")
        .fetch_all(&mut *conn)
        .await?;

    Ok(cars)
}

pub async fn find_by_id(conn: &mut MySqlConnection, id: i64) -> AppResult<Option<Car>> {
    let car = sqlx::query_as::<_, Car>("SELECT * FROM Cars WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(car)
}

/// Inserts `car` and returns the generated id
pub async fn insert(conn: &mut MySqlConnection, car: &NewCar) -> AppResult<i64> {
    let query = sqlx::query("INSERT INTO Cars (make, model, year) VALUES (?, ?, ?)");
    let query = bind_field(query, car.make.as_ref());
    let query = bind_field(query, car.model.as_ref());
    let query = bind_field(query, car.year.as_ref());

    let result = query.execute(&mut *conn).await?;

    // AUTO_INCREMENT on a signed BIGINT never exceeds i64::MAX
    Ok(result.last_insert_id() as i64)
}

/// `UPDATE` touching only the supplied columns, or `None` when nothing was supplied
///
/// An explicit `null` counts as supplied. Placeholders follow the order make,
/// model, year, then the id.
pub fn update_statement(changes: &CarChanges) -> Option<String> {
    let mut assignments = Vec::new();

    if changes.make.is_some() {
        assignments.push("make = ?");
    }
    if changes.model.is_some() {
        assignments.push("model = ?");
    }
    if changes.year.is_some() {
        assignments.push("year = ?");
    }

    if assignments.is_empty() {
        return None;
    }

    Some(format!(
        "UPDATE Cars SET {} WHERE id = ?",
        assignments.join(", ")
    ))
}

/// Applies `changes` to the row; returns `false` without touching the database if there are none
pub async fn update(conn: &mut MySqlConnection, id: i64, changes: &CarChanges) -> AppResult<bool> {
    let Some(statement) = update_statement(changes) else {
        return Ok(false);
    };

    let mut query = sqlx::query(&statement);
    for value in [&changes.make, &changes.model, &changes.year]
        .into_iter()
        .flatten()
    {
        query = bind_field(query, Some(value));
    }

    query.bind(id).execute(&mut *conn).await?;

    Ok(true)
}

pub async fn mark_deleted(conn: &mut MySqlConnection, id: i64) -> AppResult<()> {
    sqlx::query("UPDATE Cars SET deleted_flag = 1 WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}
