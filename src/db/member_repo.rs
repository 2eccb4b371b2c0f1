use sqlx::PgPool;

use crate::models::Member;

pub async fn get_member_by_id(pool: &PgPool, member_id: i64) -> anyhow::Result<Option<Member>> {
    let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
        .bind(member_id)
        .fetch_optional(pool)
        .await?;

    Ok(member)
}

pub async fn get_member_by_email(pool: &PgPool, email: &str) -> anyhow::Result<Option<Member>> {
    let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(member)
}

/// Persist the mutable fields of `member` (profile and session state).
pub async fn save_member(pool: &PgPool, member: &Member) -> anyhow::Result<Member> {
    let saved = sqlx::query_as::<_, Member>(
        r#"
        UPDATE members
        SET password = $2, name = $3, phone = $4, last_login_date = $5, refresh_token = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(member.id)
    .bind(&member.password)
    .bind(&member.name)
    .bind(&member.phone)
    .bind(member.last_login_date)
    .bind(&member.refresh_token)
    .fetch_one(pool)
    .await?;

    Ok(saved)
}
