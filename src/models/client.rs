use uuid::Uuid;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Fields supplied when creating a client; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewClient {
    pub fn into_client(self, id: Uuid) -> Client {
        Client {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}
