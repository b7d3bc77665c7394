use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub role: String,
    pub total_points: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_completions::Entity")]
    GameCompletions,
}

impl Related<super::game_completions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameCompletions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
