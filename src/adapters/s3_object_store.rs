use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;

use crate::domain::{AppError, StorageConfig};
use crate::ports::ObjectStore;

/// Object store writing into one S3 bucket.
pub struct S3ObjectStore {
    bucket_name: String,
    bucket: Box<Bucket>,
}

impl std::fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore").field("bucket", &self.bucket_name).finish()
    }
}

impl S3ObjectStore {
    /// Open `bucket_name` using ambient AWS credentials.
    pub fn open(bucket_name: &str, storage: &StorageConfig) -> Result<Self, AppError> {
        let region = region_for(storage)?;
        let credentials = Credentials::default().map_err(|err| {
            AppError::config_error(format!("Failed to load AWS credentials: {}", err))
        })?;

        let bucket: Box<Bucket> = Bucket::new(bucket_name, region, credentials)
            .map_err(|err| {
                AppError::config_error(format!("Failed to open bucket '{}': {}", bucket_name, err))
            })?
            .into();
        let bucket: Box<Bucket> =
            if storage.endpoint.is_some() { bucket.with_path_style().into() } else { bucket };

        Ok(Self { bucket_name: bucket_name.to_string(), bucket })
    }
}

impl ObjectStore for S3ObjectStore {
    fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), AppError> {
        let response = self
            .bucket
            .put_object_with_content_type(key, body, content_type)
            .map_err(|err| AppError::Publish { key: key.to_string(), message: err.to_string() })?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(AppError::Publish {
                key: key.to_string(),
                message: format!("S3 responded with status {}", status),
            });
        }
        Ok(())
    }

    fn location(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket_name, key)
    }
}

/// A custom endpoint (MinIO, localstack) takes precedence over a named region.
fn region_for(storage: &StorageConfig) -> Result<Region, AppError> {
    match (&storage.region, &storage.endpoint) {
        (region, Some(endpoint)) => Ok(Region::Custom {
            region: region.clone().unwrap_or_else(|| "us-east-1".to_string()),
            endpoint: endpoint.clone(),
        }),
        (Some(region), None) => region
            .parse::<Region>()
            .map_err(|err| AppError::config_error(format!("Invalid region '{}': {}", region, err))),
        (None, None) => Err(AppError::config_error(
            "No storage region configured. Set AWS_REGION or storage.region and try again.",
        )),
    }
}
