mod invoices;

pub(crate) use invoices::import_invoices;
