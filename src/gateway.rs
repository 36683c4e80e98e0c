pub mod ddb;
pub mod factory;
pub mod pages;
pub mod photos;
pub mod s3;

#[derive(Debug, PartialEq)]
pub(crate) enum PhotoStoreVia {
    S3,
    LocalDynamoDB,
}
