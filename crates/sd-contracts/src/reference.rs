//! Reference-data contracts: categories, subcategories, materials.

use sd_core::error::ValidationErrors;
use sd_models::{Category, Material, Subcategory};

use crate::base::{require, Contract, ValidationResult};

pub struct CategoryContract;

impl Contract<Category> for CategoryContract {
    fn validate(&self, category: &Category) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", !category.name.trim().is_empty(), "is required");
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub struct SubcategoryContract;

impl Contract<Subcategory> for SubcategoryContract {
    fn validate(&self, subcategory: &Subcategory) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", !subcategory.name.trim().is_empty(), "is required");
        require(&mut errors, "categoryId", subcategory.category_id > 0, "is required");
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub struct MaterialContract;

impl Contract<Material> for MaterialContract {
    fn validate(&self, material: &Material) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", !material.name.trim().is_empty(), "is required");
        require(&mut errors, "categoryId", material.category_id > 0, "is required");
        require(
            &mut errors,
            "unitPrice",
            material.unit_price > 0.0,
            "must be greater than zero",
        );
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_models::MeasurementType;

    #[test]
    fn test_material_contract() {
        let material = Material {
            id: None,
            name: "Plywood 18mm".into(),
            category_id: 2,
            subcategory_id: None,
            measurement_type: MeasurementType::Area,
            unit_price: 145.0,
            status: 1,
            created_at: None,
            updated_at: None,
        };
        assert!(MaterialContract.validate(&material).is_ok());

        let free = Material { unit_price: 0.0, ..material };
        let errors = MaterialContract.validate(&free).unwrap_err();
        assert!(errors.has_error("unitPrice"));
    }

    #[test]
    fn test_subcategory_needs_parent() {
        let subcategory = Subcategory {
            id: None,
            category_id: 0,
            name: "Hinges".into(),
            status: 1,
            created_at: None,
            updated_at: None,
        };
        let errors = SubcategoryContract.validate(&subcategory).unwrap_err();
        assert!(errors.has_error("categoryId"));
    }
}
