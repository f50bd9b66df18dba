//! Service tests for the payment service


mod claim_store;
