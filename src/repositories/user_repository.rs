use sea_orm::*;
use crate::config::LoginField;
use crate::entities::{user, user::Entity as User};

pub struct UserRepository;

impl UserRepository {
    // Find an active user by the configured login key
    pub async fn find_active_by_login_id<C: ConnectionTrait>(
        db: &C,
        login_field: LoginField,
        login_id: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        let condition = match login_field {
            LoginField::Username => Condition::all().add(user::Column::Username.eq(login_id)),
            LoginField::Email => Condition::all().add(user::Column::Email.eq(login_id)),
            LoginField::Any => Condition::any()
                .add(user::Column::Email.eq(login_id))
                .add(user::Column::Username.eq(login_id)),
        };

        User::find()
            .filter(condition)
            .filter(user::Column::IsActive.eq(true))
            .one(db)
            .await
    }

    // Public profiles: active, non-superuser accounts only
    pub async fn find_public_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::IsActive.eq(true))
            .filter(user::Column::IsSuperuser.eq(false))
            .one(db)
            .await
    }

    pub async fn find_active_by_id<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id)
            .filter(user::Column::IsActive.eq(true))
            .one(db)
            .await
    }

    // Rows clashing with the given username or email, optionally ignoring one user
    pub async fn find_duplicates<C: ConnectionTrait>(
        db: &C,
        username: &str,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<Vec<user::Model>, DbErr> {
        let mut query = User::find().filter(
            Condition::any()
                .add(user::Column::Email.eq(email))
                .add(user::Column::Username.eq(username)),
        );
        if let Some(id) = exclude_id {
            query = query.filter(user::Column::Id.ne(id));
        }
        query.all(db).await
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        username: String,
        email: String,
        password_hash: String,
        is_staff: bool,
        is_superuser: bool,
    ) -> Result<user::Model, DbErr> {
        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            is_active: Set(true),
            is_staff: Set(is_staff),
            is_superuser: Set(is_superuser),
            last_login: Set(None),
            ..Default::default()
        };

        new_user.insert(db).await
    }
}
