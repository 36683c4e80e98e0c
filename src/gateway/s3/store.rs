use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use crate::core::clinic::{ClinicError, ClinicResult};
use crate::gateway::photos::PhotoStore;

#[derive(Debug)]
pub struct S3PhotoStore {
    client: Client,
    bucket: String,
    region: String,
}

impl S3PhotoStore {
    pub(crate) fn new(client: Client, bucket: &str, region: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl PhotoStore for S3PhotoStore {
    async fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> ClinicResult<()> {
        // the paths are freshly generated uuids, so an existing object means a
        // broken caller rather than a concurrent writer
        if self.client
            .head_object()
            .bucket(self.bucket.as_str())
            .key(path)
            .send()
            .await.is_ok() {
            return Err(ClinicError::duplicate_key(
                format!("photo object already exists at {}", path).as_str()));
        }
        self.client
            .put_object()
            .bucket(self.bucket.as_str())
            .key(path)
            .content_type(content_type)
            .cache_control("max-age=3600")
            .body(ByteStream::from(bytes))
            .send()
            .await.map(|_| ()).map_err(ClinicError::from)
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://{}.s3.{}.amazonaws.com/{}", self.bucket, self.region, path)
    }
}

impl From<SdkError<PutObjectError>> for ClinicError {
    fn from(err: SdkError<PutObjectError>) -> Self {
        ClinicError::runtime(format!("{:?}", err).as_str(), None)
    }
}

#[cfg(test)]
mod tests {
    use crate::gateway::photos::PhotoStore;
    use crate::gateway::s3::store::S3PhotoStore;
    use crate::utils::ddb::build_s3_client;

    #[tokio::test]
    async fn test_should_resolve_public_url() {
        let store = S3PhotoStore::new(build_s3_client().await, "vetclinic-photos", "us-east-1");
        assert_eq!("https://vetclinic-photos.s3.us-east-1.amazonaws.com/pets/a.jpg",
                   store.public_url("pets/a.jpg"));
    }
}
