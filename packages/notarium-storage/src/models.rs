use time::OffsetDateTime;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Note {
	pub id: i64,
	pub text: String,
	pub created_at: OffsetDateTime,
}
