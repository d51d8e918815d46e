use chrono::NaiveDate;
use derive_more::derive::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{} (#{})", name, id)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}
