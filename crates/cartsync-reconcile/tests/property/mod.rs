mod reconcile_properties;
