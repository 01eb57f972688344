pub mod classifier_trait;
pub mod factory;
pub mod gradient_boosting;
pub mod random_forest;
pub mod tree;
