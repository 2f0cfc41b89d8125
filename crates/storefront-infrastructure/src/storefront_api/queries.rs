//! GraphQL documents for the Storefront API

pub const SHOP_QUERY: &str = r#"
  query Shop {
    shop {
      name
      primaryDomain {
        url
      }
    }
  }
"#;

pub const MENU_QUERY: &str = r#"
  fragment MenuItem on MenuItem {
    id
    title
    url
  }
  query Menu($handle: String!) {
    menu(handle: $handle) {
      id
      items {
        ...MenuItem
        items {
          ...MenuItem
        }
      }
    }
  }
"#;

pub const FEATURED_COLLECTION_QUERY: &str = r#"
  fragment FeaturedCollection on Collection {
    id
    title
    image {
      id
      url
      altText
      width
      height
    }
    handle
  }
  query FeaturedCollection {
    collections(first: 1, sortKey: UPDATED_AT, reverse: true) {
      nodes {
        ...FeaturedCollection
      }
    }
  }
"#;

pub const RECOMMENDED_PRODUCTS_QUERY: &str = r#"
  fragment RecommendedProduct on Product {
    id
    title
    handle
    priceRange {
      minVariantPrice {
        amount
        currencyCode
      }
    }
    images(first: 1) {
      nodes {
        id
        url
        altText
        width
        height
      }
    }
  }
  query RecommendedProducts {
    products(first: 4, sortKey: UPDATED_AT, reverse: true) {
      nodes {
        ...RecommendedProduct
      }
    }
  }
"#;

pub const LOGIN_MUTATION: &str = r#"
  mutation login($input: CustomerAccessTokenCreateInput!) {
    customerAccessTokenCreate(input: $input) {
      customerUserErrors {
        code
        field
        message
      }
      customerAccessToken {
        accessToken
        expiresAt
      }
    }
  }
"#;

pub const REGISTER_LOGIN_MUTATION: &str = r#"
  mutation registerLogin($input: CustomerAccessTokenCreateInput!) {
    customerAccessTokenCreate(input: $input) {
      customerUserErrors {
        code
        field
        message
      }
      customerAccessToken {
        accessToken
        expiresAt
      }
    }
  }
"#;

pub const CUSTOMER_CREATE_MUTATION: &str = r#"
  mutation customerCreate($input: CustomerCreateInput!) {
    customerCreate(input: $input) {
      customer {
        id
      }
      customerUserErrors {
        code
        field
        message
      }
    }
  }
"#;

pub const CUSTOMER_RECOVER_MUTATION: &str = r#"
  mutation customerRecover($email: String!) {
    customerRecover(email: $email) {
      customerUserErrors {
        code
        field
        message
      }
    }
  }
"#;

pub const CUSTOMER_UPDATE_MUTATION: &str = r#"
  mutation customerUpdate(
    $customerAccessToken: String!,
    $customer: CustomerUpdateInput!
  ) {
    customerUpdate(customerAccessToken: $customerAccessToken, customer: $customer) {
      customer {
        acceptsMarketing
        email
        firstName
        id
        lastName
        phone
      }
      customerAccessToken {
        accessToken
        expiresAt
      }
      customerUserErrors {
        code
        field
        message
      }
    }
  }
"#;
