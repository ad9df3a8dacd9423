use crate::{ApiClient, ApiResult, RequestDescriptor};
use api_types::{
    AdminRestaurant, AdminRestaurantCreate, AdminUser, Fee, FeeCreate, Offer, OfferCreate,
};

/// Admin panel endpoints, served from the admin base URL.
pub struct AdminApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl AdminApi<'_> {
    pub async fn restaurants(&self) -> ApiResult<Vec<AdminRestaurant>> {
        let url = self.client.admin_url("restaurants")?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }

    pub async fn create_restaurant(&self, restaurant: &AdminRestaurantCreate) -> ApiResult<AdminRestaurant> {
        let descriptor =
            RequestDescriptor::post(self.client.admin_url("restaurants")?).json(restaurant)?;
        self.client.send_json(descriptor).await
    }

    pub async fn offers(&self) -> ApiResult<Vec<Offer>> {
        let url = self.client.admin_url("offers")?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }

    pub async fn create_offer(&self, offer: &OfferCreate) -> ApiResult<Offer> {
        let descriptor = RequestDescriptor::post(self.client.admin_url("offers")?).json(offer)?;
        self.client.send_json(descriptor).await
    }

    pub async fn fees(&self) -> ApiResult<Vec<Fee>> {
        let url = self.client.admin_url("fees")?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }

    pub async fn create_fee(&self, fee: &FeeCreate) -> ApiResult<Fee> {
        let descriptor = RequestDescriptor::post(self.client.admin_url("fees")?).json(fee)?;
        self.client.send_json(descriptor).await
    }

    pub async fn users(&self) -> ApiResult<Vec<AdminUser>> {
        let url = self.client.admin_url("users")?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }
}
