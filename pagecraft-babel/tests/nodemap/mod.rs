mod interchange;
