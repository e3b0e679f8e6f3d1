// src/db/store.rs

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::error::AppError;

// ---
// O contrato de um registro guardado num store
// ---

/// Metadados atribuídos pelo store no momento da criação.
#[derive(Debug, Clone, Copy)]
pub struct RecordMeta {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub user_id: Uuid,
    pub now: DateTime<Utc>,
}

/// Um tipo de registro do escritório (cliente, processo, fatura...).
pub trait Entity: Clone + Send + Sync + 'static {
    /// O que o chamador informa para criar um registro.
    type Draft: Send;
    /// Uma atualização parcial; campos `None` ficam intactos.
    type Patch: Send;

    /// Nome em minúsculas, usado nas mensagens ("billing rate").
    const LABEL: &'static str;
    /// O mesmo nome no início de frase ("Billing rate").
    const TITLE: &'static str;

    /// Registros com escopo de escritório só aparecem para o escritório ativo.
    const TENANT_SCOPED: bool = true;

    fn id(&self) -> Uuid;
    fn company_id(&self) -> Option<Uuid>;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    fn from_draft(meta: RecordMeta, draft: Self::Draft) -> Self;
    fn merge(&mut self, patch: Self::Patch);
    fn touch(&mut self, at: DateTime<Utc>);
}

/// Os acessores repetidos de `Entity`. `scoped` lê `company_id: Uuid`;
/// `global` é para registros sem escritório.
macro_rules! record_accessors {
    (scoped) => {
        fn company_id(&self) -> Option<uuid::Uuid> {
            Some(self.company_id)
        }
        record_accessors!(common);
    };
    (global) => {
        fn company_id(&self) -> Option<uuid::Uuid> {
            None
        }
        record_accessors!(common);
    };
    (common) => {
        fn id(&self) -> uuid::Uuid {
            self.id
        }
        fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
            self.created_at
        }
        fn updated_at(&self) -> chrono::DateTime<chrono::Utc> {
            self.updated_at
        }
        fn touch(&mut self, at: chrono::DateTime<chrono::Utc>) {
            self.updated_at = at;
        }
    };
}
pub(crate) use record_accessors;

/// Copia para o registro os campos presentes no patch. Os campos listados
/// depois de `optional:` são `Option` no registro.
macro_rules! apply_patch {
    ($target:expr, $patch:expr; $($field:ident),* $(; optional: $($opt:ident),+)? $(,)?) => {{
        let patch = $patch;
        $(
            if let Some(value) = patch.$field {
                $target.$field = value;
            }
        )*
        $($(
            if let Some(value) = patch.$opt {
                $target.$opt = Some(value);
            }
        )+)?
    }};
}
pub(crate) use apply_patch;

/// Quem está pedindo e em qual escritório.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub user_id: Uuid,
    pub company_id: Option<Uuid>,
}

impl Scope {
    pub fn new(user_id: Uuid, company_id: Option<Uuid>) -> Self {
        Self { user_id, company_id }
    }

    fn sees<T: Entity>(&self, record: &T) -> bool {
        if !T::TENANT_SCOPED {
            return true;
        }
        self.company_id.is_some() && record.company_id() == self.company_id
    }
}

// ---
// O store em memória
// ---

/// Coleção ordenada (ordem de inserção) de um tipo de registro.
pub struct EntityStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records: RwLock::new(records) }
    }

    /// Registros visíveis no escopo. Sem escritório ativo, um store com
    /// escopo de escritório não lista nada.
    pub async fn list(&self, scope: &Scope) -> Vec<T> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| scope.sees(*r))
            .cloned()
            .collect()
    }

    /// Registros de um escritório específico, independente do escritório ativo.
    pub async fn list_in(&self, company_id: Uuid) -> Vec<T> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.company_id() == Some(company_id))
            .cloned()
            .collect()
    }

    pub async fn get(&self, scope: &Scope, id: Uuid) -> Option<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id && scope.sees(*r))
            .cloned()
    }

    pub async fn add(&self, scope: &Scope, draft: T::Draft) -> Result<T, AppError> {
        if T::TENANT_SCOPED && scope.company_id.is_none() {
            return Err(AppError::NoActiveCompany);
        }

        let mut records = self.records.write().await;
        let meta = RecordMeta {
            id: fresh_id(&records),
            company_id: if T::TENANT_SCOPED { scope.company_id } else { None },
            user_id: scope.user_id,
            now: Utc::now(),
        };

        let record = T::from_draft(meta, draft);
        records.push(record.clone());
        Ok(record)
    }

    pub async fn update(&self, scope: &Scope, id: Uuid, patch: T::Patch) -> Result<T, AppError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id && scope.sees(&**r))
            .ok_or(AppError::NotFound(T::TITLE))?;

        let previous = record.updated_at();
        record.merge(patch);
        // Nunca volta no tempo, mesmo se o relógio voltar
        record.touch(Utc::now().max(previous));
        Ok(record.clone())
    }

    /// Remove pelo id. Ausente é no-op; devolve se algo foi removido.
    pub async fn delete(&self, scope: &Scope, id: Uuid) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !(r.id() == id && scope.sees(r)));
        records.len() != before
    }
}

fn fresh_id<T: Entity>(records: &[T]) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !records.iter().any(|r| r.id() == id) {
            return id;
        }
    }
}
