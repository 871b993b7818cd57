use std::sync::Arc;

use md_dao::Db;

pub struct ApiRestCtx {
    dao: ApiRestDaoCtx,
}

impl ApiRestCtx {
    pub fn new(dao: ApiRestDaoCtx) -> Self {
        Self { dao }
    }

    pub fn dao(&self) -> &ApiRestDaoCtx {
        &self.dao
    }
}

pub struct ApiRestDaoCtx {
    db: Arc<Db>,
}

impl ApiRestDaoCtx {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }
}
