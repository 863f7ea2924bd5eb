//! # sd-db
//!
//! Database layer for Sitedesk: PostgreSQL access through SQLx.
//!
//! - Connection pool management
//! - Repository pattern for CRUD operations
//! - Soft-delete status updates for reference data
//! - Aggregation queries for payments and expenses
//!
//! ## Example
//!
//! ```ignore
//! use sd_db::{Database, DatabaseConfig, ClientRepository, Repository};
//!
//! let db = Database::connect(&DatabaseConfig::from_env()).await?;
//! let repo = ClientRepository::new(db.pool().clone());
//! let client = repo.find_by_id(1).await?;
//! ```

pub mod banks;
pub mod categories;
pub mod clients;
pub mod estimates;
pub mod expenses;
pub mod materials;
pub mod payments;
pub mod pool;
pub mod repository;
pub mod stages;
pub mod subcategories;
pub mod users;

pub use banks::{BankRepository, BankRow, CreateBankDto, UpdateBankDto};
pub use categories::{CategoryRepository, CategoryRow, CreateCategoryDto, UpdateCategoryDto};
pub use clients::{ClientRepository, ClientRow, CreateClientDto, UpdateClientDto};
pub use estimates::{
    CreateEstimateDto, CreateEstimateItemDto, EstimateItemRow, EstimateRepository, EstimateRow,
};
pub use expenses::{CategoryTotalRow, CreateExpenseDto, ExpenseRepository, ExpenseRow, MonthlyTotalRow};
pub use materials::{CreateMaterialDto, MaterialRepository, MaterialRow, UpdateMaterialDto};
pub use payments::{CreatePaymentDto, PaymentRepository, PaymentRow};
pub use pool::{Database, DatabaseConfig, PoolStats};
pub use repository::{PaginatedResult, Pagination, Repository, RepositoryError, RepositoryResult};
pub use stages::{StageRepository, StageRow};
pub use subcategories::{
    CreateSubcategoryDto, SubcategoryRepository, SubcategoryRow, UpdateSubcategoryDto,
};
pub use users::{CreateUserDto, UserRepository, UserRow};
